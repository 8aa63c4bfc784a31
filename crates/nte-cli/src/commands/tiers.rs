use comfy_table::{ContentArrangement, Table};

use nte_mechanics::Difficulty;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Difficulty", "Black tokens"]);

    for tier in Difficulty::ALL {
        let marker = if tier == Difficulty::default() {
            " (default)"
        } else {
            ""
        };
        table.add_row(vec![
            tier.id().to_string(),
            format!("{}{marker}", tier.label()),
            tier.blacks().to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

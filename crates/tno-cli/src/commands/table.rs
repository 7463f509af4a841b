use comfy_table::{ContentArrangement, Table};
use tno_core::band_for_margin;

pub fn run(from: i64, to: i64) -> Result<(), String> {
    if from > to {
        return Err(format!("empty range: --from {from} is above --to {to}"));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Margin", "Band"]);

    for margin in from..=to {
        let band = band_for_margin(margin);
        table.add_row(vec![format!("{margin:+}"), super::paint(band).to_string()]);
    }

    println!("{table}");
    Ok(())
}

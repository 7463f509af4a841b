use tno_core::band;

pub fn run(total: i64, dc: i64) -> Result<(), String> {
    let margin = band::margin(total, dc);
    let band = band::band_for_margin(margin);
    println!("  total {total} vs DC {dc}: margin {margin:+}, {}", super::paint(band));
    Ok(())
}

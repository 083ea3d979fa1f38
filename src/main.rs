use std::io;

use file_triage::action::cli::process_cli_mode;

fn main() -> io::Result<()> {
    let summary = process_cli_mode()?;
    log::info!(
        "走訪完成，共 {} 個項目，略過 {}，列出 {}，刪除 {}，封存 {}",
        summary.visited, summary.skipped, summary.listed, summary.deleted, summary.archived
    );
    Ok(())
}

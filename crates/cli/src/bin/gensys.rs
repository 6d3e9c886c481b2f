use anyhow::Result;

fn main() -> Result<()> {
    gensys_cli::main_entry()
}

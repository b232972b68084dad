fn main() -> anyhow::Result<()> {
    simpak::cli::run_cli()
}

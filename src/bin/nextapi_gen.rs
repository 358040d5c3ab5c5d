fn main() -> anyhow::Result<()> {
    nextapi::cli::run_cli()
}

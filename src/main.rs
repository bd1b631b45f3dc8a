fn main() -> anyhow::Result<()> {
    multibody::cli::run_cli()
}

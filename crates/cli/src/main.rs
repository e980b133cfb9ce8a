fn main() -> anyhow::Result<()> {
    codenav_cli::run()
}

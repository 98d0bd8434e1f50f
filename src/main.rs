fn main() -> anyhow::Result<()> {
    border_prune::run()
}

fn main() -> anyhow::Result<()> {
    ringfield::run()
}

fn main() -> anyhow::Result<()> {
    railwatch_lib::run()
}

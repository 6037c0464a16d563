fn main() -> Result<(), Box<dyn std::error::Error>> {
    stormscope_cli::run()
}

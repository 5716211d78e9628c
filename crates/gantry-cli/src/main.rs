fn main() -> Result<(), Box<dyn std::error::Error>> {
    gantry_cli::runner::main(std::env::args().collect())
}

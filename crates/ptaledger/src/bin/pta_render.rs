//! pta-render - Run the query blocks of a Markdown document.

fn main() -> std::process::ExitCode {
    ptaledger::cmd::render::main()
}

//! pta-check - Validate a ledger file.

fn main() -> std::process::ExitCode {
    ptaledger::cmd::check::main()
}

//! pta-query - Run a balance query against a ledger.

fn main() -> std::process::ExitCode {
    ptaledger::cmd::query::main()
}

fn main() {
    lsn::init_logging();
    if let Err(err) = lsn::entry() {
        if err.is_broken_pipe() {
            return;
        }
        eprintln!("lsn: {err}");
        std::process::exit(err.exit_code());
    }
}

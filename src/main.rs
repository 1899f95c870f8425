fn main() {
    wfm::app::cli::run();
}

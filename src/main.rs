fn main() {
    if let Err(err) = promo_split::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

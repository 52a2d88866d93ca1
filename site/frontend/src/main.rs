use ember::zoon::eprintln;

fn main() {
    if let Err(error) = ember::platform::browser::start() {
        eprintln!("ember failed to start: {error}");
    }
}

pub fn exit(message: &str, status: i32) -> ! {
    eprintln!("{}", message);
    std::process::exit(status);
}

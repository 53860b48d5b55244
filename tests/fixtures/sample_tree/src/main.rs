// brown fox
fn main() {}

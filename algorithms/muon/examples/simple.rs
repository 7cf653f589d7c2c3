//! Muon Basic Example
//!
//! Minimal usage: `let h = muon::hash(&data);`

#![allow(clippy::pedantic, clippy::nursery)]

fn main() {
    let data = b"Hello, World!";
    let h = muon::hash(data);

    println!("Data:    {:?}", String::from_utf8_lossy(data));
    println!("Hash:    {h:016x}");
    println!("Bytesum: {}", muon::bytesum(data));
    println!("Backend: {}", muon::active_backend());
}

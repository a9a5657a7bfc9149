//! Reads and writes a record nested in a record.
//!
//! Set `RUST_LOG=trace` to see which field a failing read stopped at.
use wireschema::logging::init_logging;
use wireschema::record;
use wireschema::schema::uint16;
use wireschema::{sink, source};

record! {
    #[derive(Clone, Copy, Debug)]
    pub struct Point {
        pub x: u16 = uint16(),
        pub y: u16 = uint16(),
    }
}

record! {
    #[derive(Clone, Copy, Debug)]
    pub struct Rectangle {
        pub a: Point = Point::message(),
        pub b: Point = Point::message(),
    }
}

fn main() {
    init_logging();

    let rectangle = Rectangle::message();

    // Read a rectangle from a byte slice.
    let bytes = [10, 20, 30, 40, 35, 0, 0, 5];
    let mut stream = source::from_slice(&bytes);
    match rectangle.read(&mut stream) {
        Ok(value) => println!("{:?}", value),
        Err(err) => println!("failed to read rectangle: {}", err),
    }

    // A truncated rectangle fails at the innermost field.
    if let Err(err) = rectangle.parse_slice(&bytes[..7]) {
        println!("failed to read rectangle: {}", err);
    }

    // Write a rectangle byte by byte.
    let value = Rectangle {
        a: Point { x: 10, y: 20 },
        b: Point { x: 270, y: 40 },
    };
    rectangle
        .write(value)
        .emit(&mut sink::from_fn(|byte| println!("{}", byte)));
}

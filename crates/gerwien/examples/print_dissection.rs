//! Print a random dissection as plain text.
//!
//! Usage:
//!   cargo run -p gerwien --example print_dissection -- [seed] [index]
//!
//! Prints source/target dimensions, then every piece at amount = 0 and 1.

use gerwien::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0u64);
    let index = args.next().and_then(|s| s.parse().ok()).unwrap_or(0u64);

    let (mut shape, target) = match random_dissection_input(10000.0, ReplayToken::new(seed, index))
    {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("bad input: {e}");
            return;
        }
    };
    println!("source: {:?}", shape.info());
    println!("target: {target:?}");
    if let Err(e) = shape.triangle_to_triangle(&target) {
        eprintln!("dissection failed: {e}");
        return;
    }
    println!("{} pieces, area {:.6}", shape.parts().len(), shape.area());
    for (i, part) in shape.parts().iter().enumerate() {
        let fmt = |pts: Vec<Point>| {
            pts.iter()
                .map(|p| format!("({:.3}, {:.3})", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ")
        };
        println!("#{i:<3} from {}", fmt(part.transformed_points(0.0)));
        println!("     to   {}", fmt(part.transformed_points(1.0)));
    }
}

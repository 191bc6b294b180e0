#![allow(dead_code)]

use sift_validator::Structure;

#[derive(Structure)]
struct Pair(u8, u8);

fn main() {}

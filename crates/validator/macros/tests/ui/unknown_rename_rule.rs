#![allow(dead_code)]

use sift_validator::Structure;

#[derive(Structure)]
#[serde(rename_all = "Title Case")]
struct Signup {
    user_name: String,
}

fn main() {}

use lmx_core::history::{encode_query, parse_query};

pub fn url_encode(text: &str, next: Option<&str>) {
    println!("{}", encode_query(text, next));
}

pub fn url_decode(query: &str) {
    match parse_query(query) {
        Some(text) => println!("{text}"),
        None => println!("(no text)"),
    }
}

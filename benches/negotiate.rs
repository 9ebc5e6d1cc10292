#![feature(test)]

extern crate test;

use http_accept::{parse_languages, parse_media_types, Locales, Map};
use test::Bencher;


#[bench]
fn map_resolve_wildcard(b: &mut Bencher) {
    let mut map = Map::new();
    map.insert("text/html").insert("text/plain").insert("application/json");
    let accept = parse_media_types("image/png, image/*;q=0.9, text/*;q=0.5").unwrap();
    b.iter(|| map.resolve(&accept))
}

#[bench]
fn map_resolve_miss(b: &mut Bencher) {
    let mut map = Map::new();
    map.insert("text/html").insert("application/json");
    let accept = parse_media_types("image/png, image/gif, audio/*, video/*").unwrap();
    b.iter(|| map.resolve(&accept))
}

#[bench]
fn locales_intersect(b: &mut Bencher) {
    let locales = Locales::new(vec!["en-us", "en-nz", "en-au", "de-de", "zh-hant-tw"]);
    let languages = parse_languages("ja, zh-hant, en-au;q=0.8, en;q=0.5").unwrap();
    b.iter(|| locales.intersect(&languages))
}

#![no_main]
#![allow(non_snake_case)]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use leanjson::{Codec, CodecOptions, clear_type_cache, decode, encode, reflect_struct};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // flags

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

#[derive(Debug, Default, PartialEq)]
struct Coordinates {
    Latitude: f64,
    Longitude: f64,
    Accuracy: i32,
}
reflect_struct!(Coordinates {
    Latitude,
    Longitude,
    Accuracy
});

#[derive(Debug, Default, PartialEq)]
struct Address {
    ID: String,
    Street: String,
    PostalCode: String,
    Coordinates: Option<Box<Coordinates>>,
    IsPrimary: bool,
}
reflect_struct!(Address {
    ID => "id",
    Street,
    PostalCode,
    Coordinates,
    IsPrimary,
});

#[derive(Debug, Default, PartialEq)]
struct User {
    ID: String,
    Age: u8,
    Score: f32,
    Balance: i64,
    Tags: Vec<String>,
    Counts: Vec<i16>,
    Addresses: Vec<Address>,
    Primary: Option<Address>,
    Nickname: Option<String>,
}
reflect_struct!(User {
    ID,
    Age,
    Score,
    Balance,
    Tags,
    Counts,
    Addresses,
    Primary,
    Nickname,
});

/// Keys the generator draws from, so decoded documents actually reach fields.
static KEYS: &[&str] = &[
    "ID", "id", "Age", "age", "Score", "score", "Balance", "Tags", "Counts", "Addresses",
    "addresses", "Primary", "Nickname", "Street", "PostalCode", "postal_code", "Coordinates",
    "coordinates", "Latitude", "Longitude", "Accuracy", "IsPrimary", "is_primary", "unknown",
];

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07);
        let limit = max_size - HEADER;
        HEADER + append_value(&mut data[HEADER..], size, limit)
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(u.arbitrary::<i64>()?.into()),
            4..=9 => Value::String(u.arbitrary()?),
            10..=14 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            15..=20 => {
                let m: Vec<(usize, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(
                    m.into_iter()
                        .map(|(k, v)| (KEYS[k % KEYS.len()].to_owned(), v.0)),
                ))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn run(data: &[u8]) {
    let Some((&flags, document)) = data.split_first() else {
        return;
    };

    if flags & 1 != 0 {
        clear_type_cache();
    }
    let codec = Codec::new(CodecOptions {
        separator: if flags & 2 != 0 { '-' } else { '_' },
        max_depth: if flags & 4 != 0 { 4 } else { 32 },
    });

    let mut user = User::default();
    if codec.decode(document, &mut user).is_ok() {
        // Whatever decodes must re-encode, and decode back to the same value.
        if let Ok(json) = encode(&user) {
            let mut again = User::default();
            decode(&json, &mut again).expect("re-encoded document must decode");
            assert_eq!(user, again);
        }
    }

    let _ = codec.decode(document, &mut Vec::<Address>::new());
    let _ = codec.decode(document, &mut String::new());
    let _ = codec.decode(document, &mut 0u64);
    let _ = codec.decode(document, &mut None::<Box<Coordinates>>);
}

fuzz_target!(|data: &[u8]| run(data));

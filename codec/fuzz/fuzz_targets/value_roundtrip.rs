#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use mpack::{decode_from_slice, Encode, Value};

// A generator mirror of `Value` so `arbitrary` can derive tree construction;
// `Value` itself holds `Bytes`, which has no `Arbitrary` impl.
#[derive(Arbitrary, Debug)]
enum Node {
    Nil,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Raw(Vec<u8>),
    Array(Vec<Node>),
    Map(Vec<(Node, Node)>),
}

fn build(node: Node) -> Value {
    match node {
        Node::Nil => Value::Nil,
        Node::Bool(v) => Value::Bool(v),
        Node::I8(v) => Value::Int8(v),
        Node::I16(v) => Value::Int16(v),
        Node::I32(v) => Value::Int32(v),
        Node::I64(v) => Value::Int64(v),
        Node::U8(v) => Value::UInt8(v),
        Node::U16(v) => Value::UInt16(v),
        Node::U32(v) => Value::UInt32(v),
        Node::U64(v) => Value::UInt64(v),
        Node::F32(v) => Value::Float32(v),
        Node::F64(v) => Value::Float64(v),
        Node::Raw(bytes) => Value::Raw(Bytes::from(bytes)),
        Node::Array(items) => Value::Array(items.into_iter().map(build).collect()),
        Node::Map(pairs) => Value::Map(
            pairs
                .into_iter()
                .map(|(key, value)| (build(key), build(value)))
                .collect(),
        ),
    }
}

// An arbitrary tree encodes, decodes, and re-encodes to the same bytes.
// Comparing encodings rather than trees makes the check width-canonical
// (a `U64` holding 5 decodes as the narrowest variant) and NaN-safe.
fuzz_target!(|node: Node| {
    let value = build(node);
    let encoded = value.encode();
    assert_eq!(encoded.len(), value.encode_size());

    let decoded = decode_from_slice(&encoded).expect("encoded value must decode");
    assert_eq!(decoded.encode(), encoded);
});

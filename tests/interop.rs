use krpc::{
  compact, AddrFamily, DecodeOptions, Envelope, Error, Method, NodeAddr, NodeId, NodeInfo,
  QueryArgs, RawValue, ReturnValue, Value, Want,
};

use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;
use std::net::Ipv4Addr;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct PingArgs {
  id: NodeId,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Ping {
  a: PingArgs,
  q: String,
  t: ByteBuf,
  y: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct FindNodeReturn {
  id: NodeId,
  nodes: ByteBuf,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct FindNodeResponse {
  r: FindNodeReturn,
  t: ByteBuf,
  y: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct ErrorMessage {
  e: (i64, String),
  t: ByteBuf,
  y: String,
}

fn id(n: u8) -> NodeId {
  NodeId::from([n; 20])
}

#[test]
fn query_matches_serde_encoding() {
  let ours = Envelope::query("aa", Method::Ping, QueryArgs::new(id(b'a')), false)
    .unwrap()
    .encode();

  let theirs = bendy::serde::ser::to_bytes(&Ping {
    a: PingArgs { id: id(b'a') },
    q: "ping".into(),
    t: ByteBuf::from(b"aa".to_vec()),
    y: "q".into(),
  })
  .unwrap();

  assert_eq!(ours, theirs);

  let parsed: Ping = bendy::serde::de::from_bytes(&ours).unwrap();
  assert_eq!(parsed.a.id, id(b'a'));
}

#[test]
fn decodes_serde_encoded_response() {
  let nodes = vec![
    NodeInfo::new(id(1), NodeAddr::new(Ipv4Addr::new(10, 0, 0, 1), 6881)),
    NodeInfo::new(id(2), NodeAddr::new(Ipv4Addr::new(10, 0, 0, 2), 6882)),
  ];

  let bytes = bendy::serde::ser::to_bytes(&FindNodeResponse {
    r: FindNodeReturn {
      id: id(9),
      nodes: ByteBuf::from(compact::encode_node_list(&nodes, AddrFamily::V4).unwrap()),
    },
    t: ByteBuf::from(vec![0, 1]),
    y: "r".into(),
  })
  .unwrap();

  let envelope = Envelope::decode(&bytes).unwrap();
  assert_eq!(envelope.sender_id(), Some(id(9)));
  assert_eq!(envelope.transaction_id().as_bytes(), [0, 1]);

  let mut seen = Vec::new();
  envelope
    .as_response()
    .unwrap()
    .ret
    .for_each_node(|node| seen.push(*node));
  assert_eq!(seen, nodes);

  assert_eq!(envelope.encode(), bytes);
}

#[test]
fn error_decodes_with_serde() {
  let ours = Envelope::error("xy", 201, "Generic Error").encode();
  let parsed: ErrorMessage = bendy::serde::de::from_bytes(&ours).unwrap();
  assert_eq!(parsed.e, (201, "Generic Error".to_string()));
  assert_eq!(parsed.y, "e");
}

#[test]
fn get_peers_exchange() {
  let querier = NodeId::random();
  let responder = NodeId::random();
  let infohash = NodeId::random();

  let query = Envelope::query(
    0x1234_u16,
    Method::GetPeers,
    QueryArgs {
      info_hash: Some(infohash),
      want: vec![Want::Nodes4],
      ..QueryArgs::new(querier)
    },
    false,
  )
  .unwrap();

  let received = Envelope::decode(&query.encode()).unwrap();
  assert_eq!(received.sender_id(), Some(querier));

  let peers = vec![
    NodeAddr::new(Ipv4Addr::new(192, 0, 2, 1), 51413),
    NodeAddr::new(Ipv4Addr::new(192, 0, 2, 2), 6881),
  ];
  let response = Envelope::response(
    received.transaction_id().clone(),
    ReturnValue {
      token: Some(b"opaque".to_vec()),
      values: peers.clone(),
      ..ReturnValue::new(responder)
    },
  )
  .unwrap();

  let answer = Envelope::decode(&response.encode()).unwrap();
  assert_eq!(answer.transaction_id(), query.transaction_id());
  assert_eq!(answer.sender_id(), Some(responder));
  assert_eq!(answer.as_response().unwrap().ret.values, peers);
}

#[test]
fn put_payload_is_opaque() {
  let item = Value::List(vec![Value::from("hello"), Value::Integer(1)]);
  let envelope = Envelope::query(
    "pp",
    Method::Put,
    QueryArgs {
      token: Some(b"tok".to_vec()),
      v: Some(RawValue::from(&item)),
      ..QueryArgs::new(id(1))
    },
    false,
  )
  .unwrap();

  let decoded = Envelope::decode(&envelope.encode()).unwrap();
  let v = decoded.as_query().unwrap().args.v.clone().unwrap();
  assert_eq!(v.as_bytes(), b"l5:helloi1ee");
  assert_eq!(v.to_value().unwrap(), item);
}

#[test]
fn lenient_payload_kept_byte_for_byte() {
  let input = b"d1:rd2:id20:aaaaaaaaaaaaaaaaaaaa1:vd1:bi1e1:ai2eee1:t2:aa1:y1:re";

  assert!(matches!(
    Envelope::decode(input),
    Err(Error::UnorderedKeys { .. })
  ));

  let envelope = Envelope::decode_with(input, &DecodeOptions::lenient()).unwrap();
  let v = envelope.as_response().unwrap().ret.v.as_ref().unwrap();
  assert_eq!(v.as_bytes(), b"d1:bi1e1:ai2ee");
  assert_eq!(envelope.encode(), &input[..]);
}

#[test]
fn hostile_inputs_fail_cleanly() {
  let inputs: &[&[u8]] = &[
    b"",
    b"d",
    b"d1:t",
    b"d1:t99999999999999999999:x",
    b"d1:t2:aa1:y1:qe",
    b"d1:t2:aa1:y1:re",
    b"d1:t2:aa1:y1:ee",
    b"d1:eli1ee1:t2:aa1:y1:ee",
    b"d1:rd2:id19:aaaaaaaaaaaaaaaaaaae1:t2:aa1:y1:re",
    b"d1:rd2:id20:aaaaaaaaaaaaaaaaaaaa5:nodes1:xe1:t2:aa1:y1:re",
    b"d1:ti1e1:y1:qe",
    b"l1:t2:aae",
  ];

  for input in inputs {
    assert!(Envelope::decode(input).is_err(), "{:?}", input);
  }
}

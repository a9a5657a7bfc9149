use octseq::array::Array;
use rstest::rstest;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use wireschema::schema::{
    byte_array, pascal_string, uint16, uint24, uint32, uint64, uint8,
    unsigned_big_int, unsigned_int, Fields, Record, Value,
};
use wireschema::sink::{BuilderSink, WriterSink};
use wireschema::source::ReaderSource;
use wireschema::{record, source, Message, ReadError};

record! {
    #[derive(Clone, Debug, PartialEq)]
    struct Player {
        x: u16 = uint16(),
        y: u16 = uint16(),
        name: String = pascal_string(1),
    }
}

record! {
    #[derive(Clone, Debug, PartialEq)]
    struct CafeState {
        total_seats: u8 = uint8().ensure(|n| *n < 100),
        reserved_seats: u8 = uint8().ensure(|n| *n < 100),
    }
}

fn cafe_state() -> Message<CafeState> {
    CafeState::message().ensure(|state| {
        state.total_seats >= state.reserved_seats
    })
}

fn admin() -> Player {
    Player {
        x: 42,
        y: 150,
        name: "admin".into(),
    }
}

const ADMIN: &[u8] = &[42, 0, 150, 0, 5, 97, 100, 109, 105, 110];

//------------ Round trips ---------------------------------------------------

fn assert_round_trip<T>(message: &Message<T>, bytes: &[u8])
where
    T: std::fmt::Debug + PartialEq + 'static,
{
    let mut source = source::from_slice(bytes);
    let value = message.read(&mut source).unwrap();
    assert_eq!(source.remaining(), 0);
    assert_eq!(message.to_vec(&value), bytes);
}

#[rstest]
#[case(&[])]
#[case(&[1])]
#[case(&[1, 2])]
#[case(&[0xff, 0xfe, 0xfd])]
#[case(&[1, 2, 3, 4, 5, 6, 7, 8])]
fn unsigned_int_round_trip(#[case] bytes: &[u8]) {
    assert_round_trip(&unsigned_int(bytes.len()), bytes);
    assert_round_trip(&unsigned_big_int(bytes.len()), bytes);
}

#[test]
fn shorthand_round_trip() {
    assert_round_trip(&uint8(), &[200]);
    assert_round_trip(&uint16(), &[1, 1]);
    assert_round_trip(&uint24(), &[1, 2, 3]);
    assert_round_trip(&uint32(), &[1, 2, 3, 4]);
    assert_round_trip(&uint64(), &[9; 8]);
    assert_round_trip(&byte_array(3), b"abc");
    assert_round_trip(&pascal_string(2), &[5, 0, 104, 101, 108, 108, 111]);
    assert_round_trip(&Player::message(), ADMIN);
}

#[test]
fn length_prefixed_round_trip() {
    let blob = uint8().then(
        |len| byte_array(usize::from(*len)),
        |bytes: &Vec<u8>| bytes.len() as u8,
    );
    assert_round_trip(&blob, &[0]);
    assert_round_trip(&blob, &[3, 0xff, 0, 7]);
}

#[rstest]
#[case(unsigned_int(1).map(|_| (), |_| 0x12a), "UnsignedInt(1)")]
#[case(unsigned_int(3).map(|_| (), |_| 1 << 24), "UnsignedInt(3)")]
#[case(unsigned_big_int(9).map(|_| (), |_| 1 << 72), "UnsignedBigInt(9)")]
fn oversized_write_panics(#[case] message: Message<()>, #[case] name: &str) {
    let res = panic::catch_unwind(AssertUnwindSafe(|| message.to_vec(&())));
    let err = res.unwrap_err();
    let text = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or_default();
    assert!(text.contains(&format!("does not fit into {}", name)), "{}", text);
}

//------------ Exhaustion ----------------------------------------------------

#[rstest]
#[case(unsigned_int(4).map(|_| (), |_| 0), "UnsignedInt(4)")]
#[case(unsigned_big_int(12).map(|_| (), |_| 0), "UnsignedBigInt(12)")]
#[case(byte_array(4).map(|_| (), |_| Vec::new()), "ByteArray(4)")]
#[case(pascal_string(1).map(|_| (), |_| String::new()), "ByteArray(9)")]
fn exhaustion(#[case] message: Message<()>, #[case] name: &str) {
    let err = message.parse_slice(&[9, 1, 2]).unwrap_err();
    assert_eq!(err.message(), format!("Message ended prematurely: {}", name));
}

#[test]
fn exhaustion_in_record() {
    for len in 0..ADMIN.len() {
        let err = Player::message().parse_slice(&ADMIN[..len]).unwrap_err();
        assert!(err.message().contains("Message ended prematurely"));
        assert!(err.message().contains("at Player."));
    }
}

//------------ Little endian -------------------------------------------------

#[rstest]
#[case(&[42, 0], 42)]
#[case(&[1, 1], 257)]
fn little_endian(#[case] bytes: &[u8], #[case] value: u16) {
    assert_eq!(uint16().parse_slice(bytes), Ok(value));
    assert_eq!(uint16().to_vec(&value), bytes);
}

//------------ Records -------------------------------------------------------

#[test]
fn player() {
    assert_eq!(Player::message().to_vec(&admin()), ADMIN);
    assert_eq!(Player::message().parse_slice(ADMIN), Ok(admin()));
}

#[test]
fn player_dynamic_matches_typed() {
    let dynamic = Record::new("Player")
        .field("x", uint16().dynamic())
        .field("y", uint16().dynamic())
        .field("name", pascal_string(1).dynamic())
        .build();
    let value = dynamic.parse_slice(ADMIN).unwrap();
    assert_eq!(value.get("x"), Some(&Value::Int(42)));
    assert_eq!(value.get("name"), Some(&Value::Text("admin".into())));
    assert_eq!(dynamic.to_vec(&value), ADMIN);

    let fields: Fields = vec![
        ("name", Value::from("admin")),
        ("x", Value::from(42u16)),
        ("y", Value::from(150u16)),
    ]
    .into_iter()
    .collect();
    assert_eq!(dynamic.to_vec(&fields), ADMIN);
}

#[rstest]
#[case(&[100, 200], false)]
#[case(&[4, 3], true)]
#[case(&[255, 255], false)]
fn cafe_state_invariants(#[case] bytes: &[u8], #[case] ok: bool) {
    assert_eq!(cafe_state().parse_slice(bytes).is_ok(), ok);
}

#[test]
fn cafe_state_field_fails_first() {
    let err = cafe_state().parse_slice(&[255, 255]).unwrap_err();
    assert!(err.message().contains("CafeState.total_seats"));
    assert!(err.message().contains("Invariant broken by 255"));
}

//------------ Sources and sinks ---------------------------------------------

#[test]
fn read_from_reader() {
    let mut source = ReaderSource::new(io::Cursor::new(ADMIN.to_vec()));
    assert_eq!(Player::message().read(&mut source), Ok(admin()));
    assert!(uint8().read(&mut source).is_err());
    assert!(source.is_done());
    assert!(source.take_error().is_none());
}

#[test]
fn read_from_closure() {
    let mut bytes = ADMIN.iter().copied();
    let mut source = source::from_fn(move || bytes.next());
    assert_eq!(Player::message().read(&mut source), Ok(admin()));
}

#[test]
fn write_into_writer() {
    let mut sink = WriterSink::new(Vec::<u8>::new());
    Player::message().write(admin()).emit(&mut sink);
    assert_eq!(sink.finish().unwrap(), ADMIN);
}

#[test]
fn write_into_builder() {
    let mut sink = BuilderSink::new(Array::<16>::new());
    Player::message().write_to(&admin(), &mut sink);
    let target = sink.finish().unwrap();
    assert_eq!(AsRef::<[u8]>::as_ref(&target), ADMIN);

    let mut sink = BuilderSink::new(Array::<4>::new());
    Player::message().write_to(&admin(), &mut sink);
    assert!(sink.is_short());
}

#[test]
fn errors_are_std_errors() {
    fn parse(bytes: &[u8]) -> Result<Player, Box<dyn std::error::Error>> {
        Ok(Player::message().parse_slice(bytes)?)
    }
    assert!(parse(ADMIN).is_ok());
    let err = parse(&ADMIN[..3]).unwrap_err();
    assert_eq!(
        err.to_string(),
        ReadError::short_input("UnsignedInt", 2).at("Player", "y").to_string()
    );
}

#[test]
fn shared_schema() {
    let message = Player::message();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let message = message.clone();
            std::thread::spawn(move || message.parse_slice(ADMIN))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(admin()));
    }
}

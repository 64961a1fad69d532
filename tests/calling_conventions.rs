//! The four calling conventions agree with each other.

use cyrtrans::{
    Decoded, Encoded, Error, ErrorKind, Language, Session, SessionConfig, ValidationPolicy,
};

fn words(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

const INPUTS: [&str; 5] = ["", "Жук", "Ґанок", "ёж?", "Київ"];

#[test]
fn test_encode_conventions_agree() {
    for language in [Language::Russian, Language::Ukrainian] {
        let mut session = Session::new(language);
        for input in INPUTS {
            let input = words(input);
            let constructed = Encoded::new(&session, &input);

            let mut out = Vec::new();
            let code = session.encode_into(&mut out, &input);

            let mut pair_code = ErrorKind::None;
            let pair = session.encode_with(&input, &mut pair_code);

            let captured = session.encode(&input);
            let captured_code = session.last_error();

            match constructed {
                Ok(encoded) => {
                    assert_eq!(code, ErrorKind::None);
                    assert_eq!(pair_code, ErrorKind::None);
                    assert_eq!(captured_code, ErrorKind::None);
                    assert_eq!(out, encoded.as_slice());
                    assert_eq!(pair, encoded);
                    assert_eq!(captured, encoded);
                }
                Err(err) => {
                    assert_eq!(code, err.kind());
                    assert_eq!(pair_code, err.kind());
                    assert_eq!(captured_code, err.kind());
                    assert!(out.is_empty());
                    assert!(pair.is_empty());
                    assert!(captured.is_empty());
                }
            }
        }
    }
}

#[test]
fn test_decode_conventions_agree() {
    let inputs: [&[u8]; 6] = [b"", b"JZyk", b"JQanok", b"jk", b"j", b"Kujiv"];
    for language in [Language::Russian, Language::Ukrainian] {
        let mut session = Session::new(language);
        for input in inputs {
            let constructed = Decoded::new(&session, input);

            let mut out = Vec::new();
            let code = session.decode_into(&mut out, input);

            let mut pair_code = ErrorKind::None;
            let pair = session.decode_with(input, &mut pair_code);

            let captured = session.decode(input);
            let captured_code = session.last_error();

            match constructed {
                Ok(decoded) => {
                    assert_eq!(code, ErrorKind::None);
                    assert_eq!(pair_code, ErrorKind::None);
                    assert_eq!(captured_code, ErrorKind::None);
                    assert_eq!(out, decoded.as_slice());
                    assert_eq!(pair, decoded);
                    assert_eq!(captured, decoded);
                }
                Err(err) => {
                    assert_eq!(err.kind(), ErrorKind::InvalidByte);
                    assert_eq!(code, err.kind());
                    assert_eq!(pair_code, err.kind());
                    assert_eq!(captured_code, err.kind());
                    assert!(pair.is_empty());
                    assert!(captured.is_empty());
                }
            }
        }
    }
}

#[test]
fn test_session_capturing_overwrites_last_error() {
    let mut session = Session::new(Language::Russian);
    session.encode(&words("?"));
    assert_eq!(session.last_error(), ErrorKind::InvalidWord);
    session.decode(b"da");
    assert_eq!(session.last_error(), ErrorKind::None);
}

#[test]
fn test_return_code_reuses_buffer() {
    let session = Session::new(Language::Russian);
    let mut out: Vec<u8> = Vec::with_capacity(256);
    for input in ["а", "бв", "где"] {
        assert_eq!(session.encode_into(&mut out, &words(input)), ErrorKind::None);
        assert!(out.capacity() >= out.len());
    }
    assert_eq!(out, b"gde");

    // A failing call keeps the previous result.
    assert_eq!(session.encode_into(&mut out, &words("!")), ErrorKind::InvalidWord);
    assert_eq!(out, b"gde");
}

#[test]
fn test_return_code_keeps_spare_capacity() {
    let mut session = Session::new(Language::Russian);
    session.set_policy(ValidationPolicy::IGNORE_ALL);
    let input = words("а!!!!!!!");

    let mut fresh = Vec::new();
    assert_eq!(session.encode_into(&mut fresh, &input), ErrorKind::None);
    assert_eq!(fresh, b"a");
    assert_eq!(fresh.capacity(), fresh.len());

    let mut spare: Vec<u8> = Vec::with_capacity(64);
    assert_eq!(session.encode_into(&mut spare, &input), ErrorKind::None);
    assert_eq!(spare, b"a");
    assert!(spare.capacity() > spare.len());

    let mut spare: Vec<u16> = Vec::with_capacity(64);
    assert_eq!(session.decode_into(&mut spare, b"JZJZJZ"), ErrorKind::None);
    assert_eq!(spare, ['Ж' as u16; 3]);
    assert!(spare.capacity() > spare.len());
}

#[test]
fn test_repeated_calls_are_idempotent() {
    let session = SessionConfig::ukrainian().build();
    let input = words("Щастя");
    let first = Encoded::new(&session, &input).unwrap();
    let second = Encoded::new(&session, &input).unwrap();
    assert_eq!(first, second);

    let first = Decoded::new(&session, &first).unwrap();
    let second = Decoded::new(&session, &second).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_slice(), &input[..]);
}

#[test]
fn test_independent_sessions_across_threads() {
    let handles: Vec<_> = [Language::Russian, Language::Ukrainian]
        .into_iter()
        .map(|language| {
            std::thread::spawn(move || {
                let mut session = Session::new(language);
                let encoded = session.encode(&words("Ї"));
                (encoded.into_inner(), session.last_error())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], (b"JXY".to_vec(), ErrorKind::None));
    assert_eq!(results[1], (b"JI".to_vec(), ErrorKind::None));
}

#[test]
fn test_errors_carry_positions() {
    let session = Session::new(Language::Ukrainian);
    assert_eq!(
        session.encode_str("Гоп!"),
        Err(Error::InvalidWord {
            offset: 3,
            word: '!' as u16
        })
    );
    assert_eq!(
        session.decode_str(b"Gopj"),
        Err(Error::InvalidByte {
            offset: 4,
            byte: None
        })
    );
}

use fasta_pushback_reader::{
    EofPoint, FastaError, FastaReader, FormatError, MarkerCheck, OptionsError, ReaderOptions,
};
use std::io::{BufReader, Cursor};

fn first_error(data: Vec<u8>, opts: ReaderOptions) -> FastaError {
    let mut fa = FastaReader::from_bufread(Cursor::new(data), opts).unwrap();
    loop {
        match fa.next_record() {
            Ok(Some(_)) => continue,
            Ok(None) => panic!("expected an error"),
            Err(e) => return e,
        }
    }
}

fn format_error(data: &str) -> FormatError {
    let err = first_error(data.as_bytes().to_vec(), ReaderOptions::default());
    *err.format_error().expect("format error")
}

#[test]
fn header_longer_than_limit() {
    let data = format!(">{}|1|\nACGT\n", "N".repeat(2000));
    let err = first_error(data.into_bytes(), ReaderOptions::default());
    assert_eq!(
        err.format_error(),
        Some(&FormatError::HeaderTooLong { limit: 1024 })
    );
}

#[test]
fn header_at_limit_is_accepted() {
    // '>' + 1022 bytes + '\n' == 1024
    let data = format!(">{}\nA\n", "h".repeat(1022));
    let mut fa =
        FastaReader::from_bufread(Cursor::new(data.into_bytes()), ReaderOptions::default()).unwrap();
    let r = fa.next_record().unwrap().unwrap();
    assert_eq!(r.description.map(|d| d.len()), Some(1024));
}

#[test]
fn eof_inside_header() {
    assert_eq!(
        format_error(">1|1|no newline"),
        FormatError::UnexpectedEof(EofPoint::MidHeader)
    );
    assert_eq!(
        format_error(">"),
        FormatError::UnexpectedEof(EofPoint::MidHeader)
    );
}

#[test]
fn eof_right_after_header() {
    assert_eq!(
        format_error(">1|1|d1\n"),
        FormatError::UnexpectedEof(EofPoint::BeforeSequence)
    );
}

#[test]
fn eof_after_lone_sequence_byte() {
    assert_eq!(
        format_error(">1|1|d1\nACGT\nA"),
        FormatError::UnexpectedEof(EofPoint::MidSequence)
    );
}

#[test]
fn sequence_overflows_capacity() {
    let opts = ReaderOptions {
        max_description_len: 8,
        sequence_capacity: 16,
        ..ReaderOptions::default()
    };
    let data = b">a|1|\nAAAAAAAAAA\nCCCCCCCCCC\n".to_vec();
    let err = first_error(data, opts);
    assert_eq!(
        err.format_error(),
        Some(&FormatError::SequenceOverflow { capacity: 16 })
    );
}

#[test]
fn long_line_of_failed_record_is_not_counted() {
    let opts = ReaderOptions {
        max_description_len: 8,
        sequence_capacity: 16,
        recommended_line_len: 4,
        ..ReaderOptions::default()
    };
    let data = b">a|1|\nAAAAAAAAAA\nCCCCCCCCCC\n".to_vec();
    let mut fa = FastaReader::from_bufread(Cursor::new(data), opts).unwrap();
    let err = fa.next_record().unwrap_err();
    assert_eq!(
        err.format_error(),
        Some(&FormatError::SequenceOverflow { capacity: 16 })
    );
    let stats = fa.stats();
    assert_eq!(stats.records, 0);
    assert_eq!(stats.long_lines, 0);
}

#[test]
fn blank_first_line_rejected_when_marker_required() {
    let opts = ReaderOptions {
        marker_check: MarkerCheck::Require,
        ..ReaderOptions::default()
    };
    let err = first_error(b"\n>a|1|\nAC\n".to_vec(), opts);
    assert_eq!(
        err.format_error(),
        Some(&FormatError::BadMarker { found: b'\n' })
    );
}

#[test]
fn bad_marker_when_required() {
    let opts = ReaderOptions {
        marker_check: MarkerCheck::Require,
        ..ReaderOptions::default()
    };
    let err = first_error(b"ACGT\n>a|1|\nAC\n".to_vec(), opts);
    assert_eq!(
        err.format_error(),
        Some(&FormatError::BadMarker { found: b'A' })
    );
}

#[test]
fn error_is_fatal_for_the_stream() {
    let fa = FastaReader::from_bufread(
        BufReader::new(&b">1|1|a\nAC\n>2|2|b"[..]),
        ReaderOptions::default(),
    )
    .unwrap();
    let results: Vec<_> = fa.collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().id, 1);
    assert!(matches!(
        results[1],
        Err(FastaError::Format {
            source: FormatError::UnexpectedEof(EofPoint::MidHeader),
            ..
        })
    ));
}

#[test]
fn error_context_points_into_input() {
    let err = first_error(b">1|1|a\nAC\n>2|2|b\n".to_vec(), ReaderOptions::default());
    match err {
        FastaError::Format { source, ctx } => {
            assert_eq!(source, FormatError::UnexpectedEof(EofPoint::BeforeSequence));
            assert_eq!(ctx.line_num, 3);
            assert_eq!(ctx.byte_pos, 17);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn invalid_options_rejected_at_construction() {
    let tiny = ReaderOptions {
        max_description_len: 1,
        ..ReaderOptions::default()
    };
    assert!(matches!(
        FastaReader::from_bufread(BufReader::new(&b""[..]), tiny),
        Err(FastaError::Options(OptionsError::DescriptionTooShort(1)))
    ));

    let cramped = ReaderOptions {
        max_description_len: 200,
        sequence_capacity: 100,
        ..ReaderOptions::default()
    };
    assert!(matches!(
        FastaReader::from_bufread(BufReader::new(&b""[..]), cramped),
        Err(FastaError::Options(OptionsError::BufferTooSmall {
            buffer: 102,
            description: 200
        }))
    ));

    assert!(ReaderOptions::default().validate().is_ok());
}

#[test]
fn oversized_capacity_rejected_without_panicking() {
    let huge = ReaderOptions {
        sequence_capacity: usize::MAX,
        ..ReaderOptions::default()
    };
    assert!(matches!(
        FastaReader::from_bufread(BufReader::new(&b""[..]), huge),
        Err(FastaError::Options(OptionsError::CapacityOverflow(usize::MAX)))
    ));
}

#[test]
fn large_capacity_is_not_preallocated() {
    let roomy = ReaderOptions {
        sequence_capacity: usize::MAX / 2,
        ..ReaderOptions::default()
    };
    let mut fa = FastaReader::from_bufread(BufReader::new(&b">a|3|\nACGT\n"[..]), roomy).unwrap();
    let r = fa.next_record().unwrap().unwrap();
    assert_eq!(r.id, 3);
    assert_eq!(r.sequence.as_deref(), Some(&b"ACGT"[..]));
}

//! End-to-end conversion through the public API.

use fmtconv_core::{
    ConversionChar, FormatError, ParseState, Segment, Span, codes, convert, scan, to_pretty_json,
};

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn documented_scenarios() {
    let cases = [
        ("counter = %d", "counter = {d}"),
        ("Memory address = %08x\n", "Memory address = {x:0>8}\n"),
        ("Percentage = %.2f%%\n", "Percentage = {d:.2}%\n"),
        (
            "User %s has %d points (%.2f%%)",
            "User {s} has {d} points ({d:.2}%)",
        ),
        ("%08x", "{x:0>8}"),
        ("%-8.2f", "{d:<8.2}"),
    ];
    for (src, want) in cases {
        assert_eq!(convert(src).unwrap(), want, "source {src:?}");
    }
}

#[test]
fn literals_are_verbatim() {
    for src in ["", "plain text", "tabs\tand\nnewlines", "ünïcödé ✓ 日本", "{braces} stay"] {
        assert_eq!(convert(src).unwrap(), src);
    }
}

#[test]
fn percent_escape_never_opens_a_block() {
    assert_eq!(convert("%%").unwrap(), "%");
    assert_eq!(convert("100%% of %%d").unwrap(), "100% of %d");
    assert_eq!(convert("%%%d%%").unwrap(), "%{d}%");
}

#[test]
fn every_supported_conversion_alone() {
    for conv in ConversionChar::ALL {
        let src = format!("%{}", conv.as_char());
        let want = format!("{{{}}}", conv.destination().tag());
        assert_eq!(convert(&src).unwrap(), want, "source {src:?}");
    }
}

#[test]
fn renders_fill_alignment_width_and_precision() {
    let cases = [
        ("%5d", "{d:5}"),
        ("%0d", "{d:0>}"),
        ("%-d", "{d:<}"),
        ("%-05d", "{d:<5}"),
        ("%010.3e", "{e:0>10.3}"),
        ("%.0s", "{s:.0}"),
        ("%+d", "{d}"),
        ("% d", "{d}"),
        ("%#o", "{o}"),
        ("%#10X", "{X:10}"),
        ("%lld", "{d}"),
        ("%hhx", "{x}"),
        ("%5.2Lf", "{d:5.2}"),
        ("%zu", "{d}"),
        ("%p", "{*}"),
        ("%12p", "{*:12}"),
    ];
    for (src, want) in cases {
        assert_eq!(convert(src).unwrap(), want, "source {src:?}");
    }
}

// ── Errors ──────────────────────────────────────────────────────────────────

#[test]
fn documented_errors() {
    assert!(matches!(convert("%--d"), Err(FormatError::InvalidFlag { .. })));
    assert!(matches!(
        convert("%.d"),
        Err(FormatError::MissingPrecisionDigits { .. })
    ));
    assert!(matches!(
        convert("%08"),
        Err(FormatError::UnterminatedSpecifier { .. })
    ));
}

#[test]
fn error_codes_are_stable() {
    let cases = [
        ("%--d", codes::INVALID_FLAG),
        ("%5%", codes::INVALID_CHARACTER),
        ("%.x", codes::MISSING_PRECISION_DIGITS),
        ("abc %", codes::UNTERMINATED_SPECIFIER),
        ("%k", codes::UNKNOWN_CONVERSION),
        ("%n", codes::NO_DESTINATION_EQUIVALENT),
        ("%99999999999d", codes::NUMERIC_OVERFLOW),
    ];
    for (src, code) in cases {
        let err = convert(src).unwrap_err();
        assert_eq!(err.code(), code, "source {src:?}: {err}");
        assert!(err.is_input_error());
    }
}

#[test]
fn error_spans_point_into_source() {
    let src = "value: %-5.q";
    let err = convert(src).unwrap_err();
    assert_eq!(err, FormatError::MissingPrecisionDigits { at: 11 });
    assert_eq!(err.span(), Some(Span::new(10, 11)));
    assert_eq!(&src[10..11], ".");
}

#[test]
fn grammar_order_is_enforced() {
    let cases = [
        ("%.2-d", ParseState::PrecisionFound),
        ("%l5d", ParseState::LengthFound(fmtconv_core::LengthModifier::L)),
        ("%ll.d", ParseState::SpecifierAwaited),
        ("%5 d", ParseState::WidthFound),
    ];
    for (src, state) in cases {
        match convert(src) {
            Err(FormatError::InvalidCharacterInSpecifier { state: got, .. }) => {
                assert_eq!(got, state, "source {src:?}")
            }
            other => panic!("source {src:?}: expected invalid character, got {other:?}"),
        }
    }
}

#[test]
fn six_flags_are_rejected() {
    // Five distinct flags fill the set; any sixth must repeat one.
    assert!(convert("%-+ #0d").is_ok());
    assert_eq!(
        convert("%-+ #0-d"),
        Err(FormatError::InvalidFlag { flag: '-', at: 6 })
    );
}

// ── Scan ────────────────────────────────────────────────────────────────────

#[test]
fn scan_exposes_structure() {
    let segs = scan("id=%04d%%").unwrap();
    assert_eq!(segs.len(), 3);
    let Segment::Specifier(spec) = &segs[1] else {
        panic!("expected specifier, got {:?}", segs[1]);
    };
    assert_eq!(spec.field.width, Some(4));
    assert_eq!(spec.span, Span::new(3, 7));
    assert!(matches!(segs[2], Segment::Percent { .. }));
}

#[test]
fn scan_json_dump() {
    let segs = scan("n=%-3ld").unwrap();
    let json: serde_json::Value = serde_json::from_str(&to_pretty_json(&segs)).unwrap();
    assert_eq!(json[0]["kind"], "literal");
    assert_eq!(json[0]["text"], "n=");
    assert_eq!(json[1]["kind"], "specifier");
    assert_eq!(json[1]["conversion"], "d");
    assert_eq!(json[1]["field"]["flags"], "-");
    assert_eq!(json[1]["field"]["width"], 3);
    assert_eq!(json[1]["field"]["length"], "l");
    assert!(json[1]["field"].get("precision").is_none());
}

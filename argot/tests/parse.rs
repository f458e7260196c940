mod common;

use std::iter;

use argot::{
    Builtin, Missing, OptionName, Outcome, ParseError, Parser, Specification, Tags, parse,
};
use common::Calc;

#[test]
fn empty_arguments() {
    let mut spec = Specification::default();
    assert_eq!(parse(&mut spec, &[], iter::empty()), Ok(Outcome::Complete));

    let mut rest: Vec<String> = Vec::new();
    let mut spec = Specification::builder()
        .list("REST", "", &mut rest)
        .build()
        .unwrap();
    assert_eq!(parse(&mut spec, &[], iter::empty()), Ok(Outcome::Complete));

    let mut count = 0u32;
    let mut spec = Specification::builder()
        .required("COUNT", "", &mut count)
        .build()
        .unwrap();
    assert_eq!(
        parse(&mut spec, &[], iter::empty()),
        Err(ParseError::MissingArgument(Missing::Positional("COUNT".into())))
    );

    let mut calc = Calc::default();
    let mut spec = calc.spec();
    assert_eq!(
        parse(&mut spec, &[], iter::empty()),
        Err(ParseError::MissingArgument(Missing::Command))
    );
}

#[test]
fn attached_and_separate_values_are_equivalent() {
    for args in [&["--name=value"][..], &["--name", "value"][..]] {
        let mut name = String::new();
        let mut spec = Specification::builder()
            .option(Tags::Long { long: "name" }, "NAME", "", &mut name)
            .build()
            .unwrap();

        assert_eq!(parse(&mut spec, &[], args.iter().copied()), Ok(Outcome::Complete));
        drop(spec);
        assert_eq!(name, "value");
    }
}

#[test]
fn numeric_values_must_parse_completely() {
    let (mut ratio, mut count) = (0.0f64, 0i32);
    let mut spec = Specification::builder()
        .option(Tags::Long { long: "ratio" }, "RATIO", "", &mut ratio)
        .option(Tags::Long { long: "count" }, "COUNT", "", &mut count)
        .build()
        .unwrap();

    assert_eq!(
        parse(&mut spec, &[], ["--ratio", "3.14x"]),
        Err(ParseError::InvalidValue {
            name: "RATIO".into(),
            value: "3.14x".into()
        })
    );
    assert_eq!(
        parse(&mut spec, &[], ["--count", "3.14"]),
        Err(ParseError::InvalidValue {
            name: "COUNT".into(),
            value: "3.14".into()
        })
    );
    assert_eq!(
        parse(&mut spec, &[], ["--ratio=0.25", "--count=42"]),
        Ok(Outcome::Complete)
    );

    drop(spec);
    assert_eq!(ratio, 0.25);
    assert_eq!(count, 42);
}

#[test]
fn list_collects_in_order() {
    let (mut first, mut rest) = (String::new(), Vec::<u32>::new());
    let mut spec = Specification::builder()
        .required("FIRST", "", &mut first)
        .list("REST", "", &mut rest)
        .build()
        .unwrap();

    let mut parser = Parser::new(&mut spec, &[]);
    assert_eq!(parser.parse(["a", "3", "1", "2"]), Ok(Outcome::Complete));
    assert_eq!(parser.positionals_consumed(), 4);

    drop(spec);
    assert_eq!(first, "a");
    assert_eq!(rest, [3, 1, 2]);
}

#[test]
fn unknown_options() {
    let mut spec = Specification::default();

    assert_eq!(
        parse(&mut spec, &[], ["--bogus"]),
        Err(ParseError::InvalidOption(OptionName::Long("bogus".into())))
    );
    assert_eq!(
        parse(&mut spec, &[], ["-z"]),
        Err(ParseError::InvalidOption(OptionName::Short('z')))
    );
}

#[test]
fn operands_with_a_debug_flag() {
    let (mut debug, mut lhs, mut rhs) = (false, 0i64, 0i64);
    let mut spec = Specification::builder()
        .option(Tags::from_key("d,debug").unwrap(), "debug", "", &mut debug)
        .required("NUM_0", "", &mut lhs)
        .required("NUM_1", "", &mut rhs)
        .build()
        .unwrap();

    assert_eq!(
        parse(&mut spec, &[], ["3"]),
        Err(ParseError::MissingArgument(Missing::Positional("NUM_1".into())))
    );
    assert_eq!(
        parse(&mut spec, &[], ["3", "4", "5"]),
        Err(ParseError::ExtraneousArgument("5".into()))
    );
    assert_eq!(parse(&mut spec, &[], ["-d", "3", "4"]), Ok(Outcome::Complete));

    drop(spec);
    assert!(debug);
    assert_eq!((lhs, rhs), (3, 4));
}

#[test]
fn command_selection() {
    let mut calc = Calc::default();
    let mut spec = calc.spec();

    assert_eq!(
        parse(&mut spec, &[], ["mul", "2", "3"]),
        Err(ParseError::InvalidCommand("mul".into()))
    );
    assert_eq!(
        parse(&mut spec, &[], ["add", "2", "3"]),
        Ok(Outcome::Command("add".into()))
    );

    drop(spec);
    assert_eq!((calc.add.lhs, calc.add.rhs), (2, 3));
    assert_eq!((calc.sub.lhs, calc.sub.rhs), (0, 0));
}

#[test]
fn help_short_circuits() {
    let mut calc = Calc::default();
    let mut spec = calc.spec();

    assert_eq!(
        parse(&mut spec, &[Builtin::HELP], ["-v", "add", "--help", "--bogus"]),
        Ok(Outcome::Builtin("help".into()))
    );

    // the remaining arguments were never looked at, so nothing is missing
    assert_eq!(
        parse(&mut spec, &[Builtin::HELP], ["sub", "--help"]),
        Ok(Outcome::Builtin("help".into()))
    );

    drop(spec);
    assert!(calc.verbose);
}

#[test]
fn negative_numbers_are_options() {
    let mut value = 0i32;
    let mut spec = Specification::builder()
        .required("VALUE", "", &mut value)
        .build()
        .unwrap();

    assert_eq!(
        parse(&mut spec, &[], ["-5"]),
        Err(ParseError::InvalidOption(OptionName::Short('5')))
    );
    assert_eq!(parse(&mut spec, &[], ["--", "-5"]), Ok(Outcome::Complete));

    drop(spec);
    assert_eq!(value, -5);
}

#![allow(dead_code)]

use argot::{
    Specification, Tags,
    app::{App, Dispatch},
};

/// Two integer operands, as taken by every calculator command
#[derive(Debug, Default)]
pub struct Operands {
    pub lhs: i64,
    pub rhs: i64,
}

impl Operands {
    pub fn spec(&mut self) -> Specification<'_> {
        Specification::builder()
            .required("NUM_0", "First operand", &mut self.lhs)
            .required("NUM_1", "Second operand", &mut self.rhs)
            .build()
            .unwrap()
    }
}

/// A small calculator with a global flag and two commands
#[derive(Debug, Default)]
pub struct Calc {
    pub verbose: bool,
    pub add: Operands,
    pub sub: Operands,
}

impl Calc {
    pub fn spec(&mut self) -> Specification<'_> {
        let add = self.add.spec();
        let sub = self.sub.spec();

        Specification::builder()
            .option(
                Tags::LongShort {
                    long: "verbose",
                    short: 'v',
                },
                "verbose",
                "Show the full equation",
                &mut self.verbose,
            )
            .command("add", "Add two numbers", add)
            .command("sub", "Subtract two numbers", sub)
            .build()
            .unwrap()
    }
}

/// Run `app` over `argv`, capturing what it printed to stdout and stderr.
pub fn run(app: &App<'_>, spec: &mut Specification<'_>, argv: &[&str]) -> (Dispatch, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let dispatch = app
        .run(spec, argv.iter().copied(), &mut stdout, &mut stderr)
        .unwrap();

    (
        dispatch,
        String::from_utf8(stdout).unwrap(),
        String::from_utf8(stderr).unwrap(),
    )
}

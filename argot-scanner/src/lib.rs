#![no_std]

/*!
Low-level classification of command-line arguments. Takes care of distinctions
between options, positionals, and the `--` terminator, and of splitting
`--key=value` and `-abc=value` forms. No type handling and no lookup against
a specification happens here; that's the job of the `argot` crate.
*/

use ::core::iter::{FusedIterator, Peekable};
use ::core::str::Chars;

/// The broad lexical class of a single raw argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Starts with `-` and has at least one more character (`-v`, `--path`)
    Option,

    /// Anything that isn't an option or a terminator, including a lone `-`
    Positional,

    /// Exactly `--`
    Terminator,
}

/// The two forms an option can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// A cluster of single-letter options, such as `-v` or `-xvf=out.tar`
    Letters,

    /// A single long option, such as `--verbose` or `--output=out.tar`. A bare
    /// `--=value` is still a word, with an empty key.
    Word,
}

/**
A single classified argument.

For option tokens, the [`key`][Token::key] is the text between the leading
dashes and the first `=`, and the [`value`][Token::value] is everything after
that `=`. `--path=a=b` has the key `path` and the value `a=b`; `--path=` has
the key `path` and an empty (but present) value.

[`Token`] borrows from the argument list; the ubiquitous `'arg` lifetime
refers to that borrowed command line data.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'arg> {
    raw: &'arg str,
    kind: TokenKind,
    option_kind: Option<OptionKind>,
    key: &'arg str,
    value: Option<&'arg str>,
}

impl<'arg> Token<'arg> {
    /// Classify a single raw argument.
    #[must_use]
    pub fn classify(raw: &'arg str) -> Self {
        let (kind, option_kind, body) = match raw.as_bytes() {
            b"--" => (TokenKind::Terminator, None, ""),
            [b'-', b'-', ..] => (TokenKind::Option, Some(OptionKind::Word), &raw[2..]),
            [b'-', _, ..] => (TokenKind::Option, Some(OptionKind::Letters), &raw[1..]),
            _ => (TokenKind::Positional, None, ""),
        };

        let (key, value) = match split_once(body, b'=') {
            Some((key, value)) => (key, Some(value)),
            None => (body, None),
        };

        Self {
            raw,
            kind,
            option_kind,
            key,
            value,
        }
    }

    /// The argument exactly as it appeared on the command line
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &'arg str {
        self.raw
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The option form, or [`None`] if this isn't an option token
    #[inline]
    #[must_use]
    pub fn option_kind(&self) -> Option<OptionKind> {
        self.option_kind
    }

    /// The text after the leading dashes, up to (not including) the first
    /// `=`. Empty for positionals and terminators.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'arg str {
        self.key
    }

    /// The text after the first `=` of an option, if there was one.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&'arg str> {
        self.value
    }

    /**
    Iterate the letters of a [`Letters`][OptionKind::Letters] cluster. The
    final letter is flagged with [`is_last`][Letter::is_last]; any attached
    `=value` belongs to it. `-ftx=5` yields `f`, `t`, and `x` (last), and
    [`value`][Token::value] is `5`.

    Word options, positionals and terminators have no letters.
    */
    #[inline]
    #[must_use]
    pub fn letters(&self) -> Letters<'arg> {
        let cluster = match self.option_kind {
            Some(OptionKind::Letters) => self.key,
            _ => "",
        };

        Letters {
            chars: cluster.chars().peekable(),
        }
    }
}

/// A single letter from a [`Letters`][OptionKind::Letters] cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    pub letter: char,

    /// True for exactly the final letter of the cluster
    pub is_last: bool,
}

/// Iterator over the [`Letter`]s of an option cluster, created by
/// [`Token::letters`].
#[derive(Debug, Clone)]
pub struct Letters<'arg> {
    chars: Peekable<Chars<'arg>>,
}

impl Iterator for Letters<'_> {
    type Item = Letter;

    #[inline]
    fn next(&mut self) -> Option<Letter> {
        let letter = self.chars.next()?;

        Some(Letter {
            letter,
            is_last: self.chars.peek().is_none(),
        })
    }
}

impl FusedIterator for Letters<'_> {}

/**
A [`Scanner`] walks a list of raw arguments, producing one [`Token`] per
argument. It additionally allows the caller to look at the kind of the next
unconsumed argument without consuming it, which is how an option that needs a
value decides whether the following argument can be that value.

The scanner has no memory of `--`: a terminator is reported like any other
token, and it's up to the caller to treat everything after it as positional.

This list should *exclude* the name of the program, which is commonly passed
as the first argument.
*/
#[derive(Debug, Clone)]
pub struct Scanner<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    args: Peekable<I>,
    consumed: usize,
}

impl<'arg, I> Scanner<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            args: args.into_iter().peekable(),
            consumed: 0,
        }
    }

    /// Classify the next unconsumed argument without advancing. Returns
    /// [`None`] at the end of the input.
    #[inline]
    pub fn peek_kind(&mut self) -> Option<TokenKind> {
        self.args.peek().map(|&raw| Token::classify(raw).kind())
    }

    /// The number of raw arguments consumed so far
    #[inline]
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<'arg, I> Iterator for Scanner<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    type Item = Token<'arg>;

    #[inline]
    fn next(&mut self) -> Option<Token<'arg>> {
        let raw = self.args.next()?;
        self.consumed += 1;
        Some(Token::classify(raw))
    }
}

fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    // `delimiter` is ascii, so the index is always on a char boundary
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(raw: &str) -> impl Iterator<Item = (char, bool)> + '_ {
        Token::classify(raw)
            .letters()
            .map(|letter| (letter.letter, letter.is_last))
    }

    #[test]
    fn terminator() {
        let token = Token::classify("--");
        assert_eq!(token.kind(), TokenKind::Terminator);
        assert_eq!(token.option_kind(), None);
        assert_eq!(token.value(), None);
    }

    #[test]
    fn positionals() {
        for raw in ["input.txt", "-", "", "a-b", "=x"] {
            let token = Token::classify(raw);
            assert_eq!(token.kind(), TokenKind::Positional, "{raw:?}");
            assert_eq!(token.raw(), raw);
            assert_eq!(token.key(), "");
            assert_eq!(token.letters().next(), None);
        }
    }

    #[test]
    fn word_options() {
        let token = Token::classify("--path");
        assert_eq!(token.kind(), TokenKind::Option);
        assert_eq!(token.option_kind(), Some(OptionKind::Word));
        assert_eq!(token.key(), "path");
        assert_eq!(token.value(), None);

        let token = Token::classify("--path=a=b");
        assert_eq!(token.key(), "path");
        assert_eq!(token.value(), Some("a=b"));

        let token = Token::classify("--path=");
        assert_eq!(token.key(), "path");
        assert_eq!(token.value(), Some(""));
    }

    #[test]
    fn empty_word_key() {
        let token = Token::classify("--=5");
        assert_eq!(token.option_kind(), Some(OptionKind::Word));
        assert_eq!(token.key(), "");
        assert_eq!(token.value(), Some("5"));

        assert_eq!(Token::classify("---x").key(), "-x");
    }

    #[test]
    fn word_has_no_letters() {
        assert_eq!(Token::classify("--verbose").letters().next(), None);
    }

    #[test]
    fn letter_cluster() {
        let token = Token::classify("-ftx=5");
        assert_eq!(token.option_kind(), Some(OptionKind::Letters));
        assert_eq!(token.key(), "ftx");
        assert_eq!(token.value(), Some("5"));

        assert!(letters("-ftx=5").eq([('f', false), ('t', false), ('x', true)]));
        assert!(letters("-v").eq([('v', true)]));
    }

    #[test]
    fn letter_cluster_with_empty_letters() {
        let token = Token::classify("-=5");
        assert_eq!(token.option_kind(), Some(OptionKind::Letters));
        assert_eq!(token.key(), "");
        assert_eq!(token.letters().next(), None);
    }

    #[test]
    fn non_ascii_letters() {
        assert!(letters("-äö").eq([('ä', false), ('ö', true)]));
    }

    #[test]
    fn scanner_peeks_without_consuming() {
        let mut scanner = Scanner::new(["-x", "5", "--", "-y"]);

        assert_eq!(scanner.peek_kind(), Some(TokenKind::Option));
        assert_eq!(scanner.peek_kind(), Some(TokenKind::Option));
        assert_eq!(scanner.consumed(), 0);

        assert_eq!(scanner.next().map(|token| token.key()), Some("x"));
        assert_eq!(scanner.peek_kind(), Some(TokenKind::Positional));
        assert_eq!(scanner.next().map(|token| token.raw()), Some("5"));
        assert_eq!(scanner.peek_kind(), Some(TokenKind::Terminator));
        assert_eq!(scanner.next().map(|token| token.kind()), Some(TokenKind::Terminator));

        // The scanner doesn't remember the terminator
        assert_eq!(scanner.next().map(|token| token.kind()), Some(TokenKind::Option));
        assert_eq!(scanner.peek_kind(), None);
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.consumed(), 4);
    }
}

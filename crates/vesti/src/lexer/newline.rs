//! Newline normalization.

/// Iterator over the characters of a string in which `\r\n` and lone `\r`
///     are both replaced by a single `\n`.
///
/// Two characters of the raw input are buffered at any time.
#[derive(Clone, Debug)]
pub struct NewlineNormalizer<'a> {
    source: std::str::Chars<'a>,
    chr0: Option<char>,
    chr1: Option<char>,
}

impl<'a> NewlineNormalizer<'a> {
    pub fn new(source: &'a str) -> NewlineNormalizer<'a> {
        let mut source = source.chars();
        let chr0 = source.next();
        let chr1 = source.next();
        NewlineNormalizer { source, chr0, chr1 }
    }

    fn advance(&mut self) {
        self.chr0 = self.chr1;
        self.chr1 = self.source.next();
    }
}

impl<'a> Iterator for NewlineNormalizer<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = match (self.chr0?, self.chr1) {
            ('\r', Some('\n')) => {
                self.advance();
                '\n'
            }
            ('\r', _) => '\n',
            (c, _) => c,
        };
        self.advance();
        Some(c)
    }
}

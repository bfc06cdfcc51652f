use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Reg {
    A,
    X,
    Y,
}

impl Reg {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }
}

#[test]
fn test() {
    assert_eq!(Reg::parse("a"), Some(Reg::A));
    assert_eq!(Reg::parse("X"), Some(Reg::X));
    assert_eq!(Reg::parse("y"), Some(Reg::Y));
    assert_eq!(Reg::parse("s"), None);
    assert_eq!(Reg::parse("ax"), None);
}

/// Resource record types this resolver asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    PTR,
}

impl RecordType {
    pub const fn code(self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::PTR => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::PTR => "PTR",
        }
    }
}

/// The only record class in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    IN,
}

impl RecordClass {
    pub const fn code(self) -> u16 {
        match self {
            RecordClass::IN => 1,
        }
    }
}

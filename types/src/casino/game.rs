use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::{fmt, str::FromStr};

/// Casino game identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum GameId {
    Blackjack = 0,
    Roulette = 1,
    AmericanRoulette = 2,
    Slots = 3,
    Crash = 4,
    Mines = 5,
    Baccarat = 6,
    Keno = 7,
    Bingo = 8,
    Plinko = 9,
    Limbo = 10,
    HiLo = 11,
    Dice = 12,
    Craps = 13,
    SicBo = 14,
    Wheel = 15,
    Tower = 16,
    VideoPoker = 17,
}

impl GameId {
    /// Every game, in discriminant order.
    pub const ALL: [GameId; 18] = [
        GameId::Blackjack,
        GameId::Roulette,
        GameId::AmericanRoulette,
        GameId::Slots,
        GameId::Crash,
        GameId::Mines,
        GameId::Baccarat,
        GameId::Keno,
        GameId::Bingo,
        GameId::Plinko,
        GameId::Limbo,
        GameId::HiLo,
        GameId::Dice,
        GameId::Craps,
        GameId::SicBo,
        GameId::Wheel,
        GameId::Tower,
        GameId::VideoPoker,
    ];

    /// Stable lowercase name, used on the command line and in reports.
    pub fn name(&self) -> &'static str {
        match self {
            GameId::Blackjack => "blackjack",
            GameId::Roulette => "roulette",
            GameId::AmericanRoulette => "american-roulette",
            GameId::Slots => "slots",
            GameId::Crash => "crash",
            GameId::Mines => "mines",
            GameId::Baccarat => "baccarat",
            GameId::Keno => "keno",
            GameId::Bingo => "bingo",
            GameId::Plinko => "plinko",
            GameId::Limbo => "limbo",
            GameId::HiLo => "hilo",
            GameId::Dice => "dice",
            GameId::Craps => "craps",
            GameId::SicBo => "sic-bo",
            GameId::Wheel => "wheel",
            GameId::Tower => "tower",
            GameId::VideoPoker => "video-poker",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        GameId::ALL
            .iter()
            .copied()
            .find(|game| game.name() == wanted)
            .ok_or_else(|| format!("unknown game: {s}"))
    }
}

impl TryFrom<u8> for GameId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GameId::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::InvalidEnum(value))
    }
}

impl Write for GameId {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for GameId {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        GameId::try_from(u8::read(reader)?)
    }
}

impl FixedSize for GameId {
    const SIZE: usize = 1;
}

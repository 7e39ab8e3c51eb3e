use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

use super::{GameId, Multiplier};

/// Balance effect of one resolved round.
///
/// `balance_delta` is the net change across the whole round: the credit
/// (`multiplier` applied to `amount`) minus the stake debited at commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub session_id: u64,
    pub game: GameId,
    pub amount: u64,
    pub multiplier: Multiplier,
    pub credited: u64,
    pub balance_delta: i64,
}

impl Settlement {
    pub fn new(session_id: u64, game: GameId, amount: u64, multiplier: Multiplier) -> Self {
        let credited = multiplier.apply(amount);
        let balance_delta = net_delta(credited, amount);
        Self {
            session_id,
            game,
            amount,
            multiplier,
            credited,
            balance_delta,
        }
    }

    pub fn is_win(&self) -> bool {
        self.balance_delta > 0
    }
}

/// `credited - amount`, saturated to the `i64` range.
fn net_delta(credited: u64, amount: u64) -> i64 {
    let delta = credited as i128 - amount as i128;
    delta.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

impl Write for Settlement {
    fn write(&self, writer: &mut impl BufMut) {
        self.session_id.write(writer);
        self.game.write(writer);
        self.amount.write(writer);
        self.multiplier.write(writer);
        self.credited.write(writer);
        self.balance_delta.write(writer);
    }
}

impl Read for Settlement {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let session_id = u64::read(reader)?;
        let game = GameId::read(reader)?;
        let amount = u64::read(reader)?;
        let multiplier = Multiplier::read(reader)?;
        let credited = u64::read(reader)?;
        let balance_delta = i64::read(reader)?;
        if net_delta(credited, amount) != balance_delta {
            return Err(Error::Invalid("Settlement", "delta does not match credit"));
        }
        Ok(Self {
            session_id,
            game,
            amount,
            multiplier,
            credited,
            balance_delta,
        })
    }
}

impl EncodeSize for Settlement {
    fn encode_size(&self) -> usize {
        self.session_id.encode_size()
            + self.game.encode_size()
            + self.amount.encode_size()
            + self.multiplier.encode_size()
            + self.credited.encode_size()
            + self.balance_delta.encode_size()
    }
}

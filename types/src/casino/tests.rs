use super::*;
use commonware_codec::{Encode, ReadExt};

#[test]
fn test_game_id_roundtrip() {
    for game in GameId::ALL {
        let encoded = game.encode();
        let decoded = GameId::read(&mut &encoded[..]).unwrap();
        assert_eq!(game, decoded);
    }
}

#[test]
fn test_game_id_rejects_unknown_tag() {
    let bytes = [GameId::ALL.len() as u8];
    assert!(GameId::read(&mut &bytes[..]).is_err());
}

#[test]
fn test_game_id_names_parse() {
    for game in GameId::ALL {
        assert_eq!(game.name().parse::<GameId>().unwrap(), game);
    }
    assert_eq!("Sic_Bo".parse::<GameId>().unwrap(), GameId::SicBo);
    assert!("poker".parse::<GameId>().is_err());
}

#[test]
fn test_multiplier_apply_rounds_down() {
    let banker = Multiplier::from_bps(19_500);
    assert_eq!(banker.apply(10), 19);
    assert_eq!(banker.apply(100), 195);
    assert_eq!(Multiplier::ZERO.apply(1_000), 0);
    assert_eq!(Multiplier::whole(35).apply(3), 105);
}

#[test]
fn test_multiplier_from_ratio() {
    // 25 / 22 = 1.13636...
    assert_eq!(Multiplier::from_ratio(25, 22).bps(), 11_363);
    assert_eq!(Multiplier::from_ratio(1, 0), Multiplier::ZERO);
}

#[test]
fn test_multiplier_display() {
    assert_eq!(Multiplier::from_bps(15_000).to_string(), "1.50x");
    assert_eq!(Multiplier::whole(100).to_string(), "100.00x");
    assert_eq!(Multiplier::from_bps(11_363).to_string(), "1.13x");
}

#[test]
fn test_multiplier_compound() {
    let step = Multiplier::from_bps(15_000);
    assert_eq!(Multiplier::ONE.compound(step).compound(step).bps(), 22_500);
}

#[test]
fn test_settlement_roundtrip() {
    let settlement = Settlement::new(7, GameId::Baccarat, 100, Multiplier::from_bps(19_500));
    assert_eq!(settlement.credited, 195);
    assert_eq!(settlement.balance_delta, 95);

    let encoded = settlement.encode();
    let decoded = Settlement::read(&mut &encoded[..]).unwrap();
    assert_eq!(settlement, decoded);
}

#[test]
fn test_settlement_loss() {
    let settlement = Settlement::new(1, GameId::Crash, 250, Multiplier::ZERO);
    assert_eq!(settlement.credited, 0);
    assert_eq!(settlement.balance_delta, -250);
    assert!(!settlement.is_win());
}

#[test]
fn test_settlement_rejects_inconsistent_delta() {
    let mut settlement = Settlement::new(1, GameId::Wheel, 10, Multiplier::whole(2));
    settlement.balance_delta = 500;
    let encoded = settlement.encode();
    assert!(Settlement::read(&mut &encoded[..]).is_err());
}

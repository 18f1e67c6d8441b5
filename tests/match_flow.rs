//! Full-match flows driven through the public API, the way the server
//! binary drives the authority.

use frontline::game::{Board, Match, Reject, Rules};
use frontline::replica::Replica;
use frontline::shared::cb_packet::Rejected;
use frontline::shared::sb_packet::Deploy;
use frontline::shared::{CBPacket, Phase, PlayerSlot, SBPacket, Terrain, UnitKind};

fn rules_with_columns(columns: i32) -> Rules {
    Rules {
        columns,
        ..Rules::default()
    }
}

fn active_match(rules: Rules) -> Match {
    let cells = (rules.columns * rules.rows) as usize;
    let board = Board::from_terrain(
        rules.columns,
        rules.rows,
        rules.cell_size,
        vec![Terrain::Normal; cells],
    )
    .expect("board");
    let mut m = Match::with_board(rules, board);
    m.set_connected(PlayerSlot::One, true);
    m.set_connected(PlayerSlot::Two, true);
    m.begin().expect("begin");
    m.drain_deltas();
    m
}

#[test]
fn tank_fits_the_starting_balance_exactly_once() {
    let mut m = active_match(Rules::default());

    m.deploy(PlayerSlot::One, UnitKind::Tank, 0, 0).unwrap();
    assert_eq!(m.economy().balance(PlayerSlot::One), 1);

    assert_eq!(
        m.deploy(PlayerSlot::One, UnitKind::Tank, 0, 1),
        Err(Reject::InsufficientResources { need: 4, have: 1 })
    );
    assert_eq!(m.economy().balance(PlayerSlot::One), 1);
    assert_eq!(m.units().count(), 1);
}

#[test]
fn rejected_deployments_change_nothing() {
    let mut m = active_match(Rules::default());
    m.deploy(PlayerSlot::One, UnitKind::Soldier, 0, 0).unwrap();
    m.drain_deltas();
    let balance = m.economy().balance(PlayerSlot::One);

    // occupied cell
    assert_eq!(
        m.deploy(PlayerSlot::One, UnitKind::Soldier, 0, 0),
        Err(Reject::Occupied { col: 0, row: 0 })
    );
    // outside the zone
    assert_eq!(
        m.deploy(PlayerSlot::One, UnitKind::Soldier, 4, 0),
        Err(Reject::OutsideZone { col: 4 })
    );
    // off the board entirely
    assert_eq!(
        m.deploy(PlayerSlot::One, UnitKind::Soldier, 0, 9),
        Err(Reject::OutOfBounds { col: 0, row: 9 })
    );
    // not the player to move
    assert_eq!(
        m.deploy(PlayerSlot::Two, UnitKind::Soldier, 7, 0),
        Err(Reject::NotYourTurn)
    );

    assert_eq!(m.economy().balance(PlayerSlot::One), balance);
    assert_eq!(m.units().count(), 1);
    assert!(m.drain_deltas().is_empty(), "rejections replicate nothing");
}

#[test]
fn soldiers_trade_blows_until_one_falls() {
    // narrower board so the zones nearly touch
    let mut m = active_match(rules_with_columns(6));

    let p1 = m.deploy(PlayerSlot::One, UnitKind::Soldier, 1, 0).unwrap();
    m.end_turn(PlayerSlot::One).unwrap(); // advances to (2, 0)
    let p2 = m.deploy(PlayerSlot::Two, UnitKind::Soldier, 4, 0).unwrap();
    m.end_turn(PlayerSlot::Two).unwrap(); // advances to (3, 0)

    // contact: the mover attacks and holds its cell
    m.end_turn(PlayerSlot::One).unwrap();
    assert_eq!(m.unit(p2).map(|u| u.hp), Some(2));
    assert_eq!(m.unit(p1).map(|u| (u.col, u.row)), Some((2, 0)));

    m.end_turn(PlayerSlot::Two).unwrap();
    assert_eq!(m.unit(p1).map(|u| u.hp), Some(2));

    m.end_turn(PlayerSlot::One).unwrap();
    m.end_turn(PlayerSlot::Two).unwrap();
    assert_eq!(m.unit(p2).map(|u| u.hp), Some(1));
    assert_eq!(m.unit(p1).map(|u| u.hp), Some(1));

    // the killing blow moves the attacker into the freed cell
    m.end_turn(PlayerSlot::One).unwrap();
    assert!(m.unit(p2).is_none());
    assert_eq!(m.unit(p1).map(|u| (u.col, u.row)), Some((3, 0)));
    assert_eq!(m.board().occupant_at(2, 0), None);
}

#[test]
fn reaching_the_far_column_ends_the_game_and_rematch_resets_it() {
    let mut m = active_match(rules_with_columns(4));

    m.deploy(PlayerSlot::One, UnitKind::Soldier, 2, 1).unwrap();
    m.end_turn(PlayerSlot::One).unwrap();

    assert_eq!(m.turn().phase, Phase::GameOver);
    assert_eq!(m.turn().winner, Some(PlayerSlot::One));
    assert_eq!(m.end_turn(PlayerSlot::Two), Err(Reject::NotActive));

    m.set_rematch_ready(PlayerSlot::One, true).unwrap();
    assert_eq!(m.turn().phase, Phase::RematchPending);
    m.set_rematch_ready(PlayerSlot::Two, true).unwrap();

    let snapshot = m.snapshot();
    assert_eq!(snapshot.phase, Phase::Active);
    assert_eq!(snapshot.current, PlayerSlot::One);
    assert_eq!(snapshot.balances, [5, 5]);
    assert!(snapshot.units.is_empty());
    for col in 0..4 {
        for row in 0..5 {
            assert_eq!(m.board().occupant_at(col, row), None);
        }
    }
}

#[test]
fn turn_timeout_is_equivalent_to_an_end_turn_request() {
    let mut m = active_match(Rules::default());
    let id = m.deploy(PlayerSlot::One, UnitKind::Jeep, 0, 3).unwrap();

    let mut elapsed = 0.0;
    while m.turn().current == PlayerSlot::One {
        m.tick(0.25);
        elapsed += 0.25;
        assert!(elapsed < 20.0, "timer never expired");
    }
    assert_eq!(m.unit(id).map(|u| u.col), Some(1));
    assert_eq!(m.turn().current, PlayerSlot::Two);
}

#[test]
fn an_observer_stays_consistent_over_the_wire_format() {
    let mut m = active_match(rules_with_columns(6));
    let mut replica = Replica::new();
    replica.apply_snapshot(m.snapshot());

    m.deploy(PlayerSlot::One, UnitKind::Soldier, 1, 2).unwrap();
    m.end_turn(PlayerSlot::One).unwrap();

    // ship every delta through the same encoding the server uses
    for delta in m.drain_deltas() {
        let bytes = bincode::serialize(&CBPacket::Delta(delta)).unwrap();
        match bincode::deserialize::<CBPacket>(&bytes).unwrap() {
            CBPacket::Delta(delta) => replica.apply(&delta),
            other => panic!("unexpected packet {other:?}"),
        }
    }

    let snapshot = m.snapshot();
    let mut units: Vec<_> = replica.units.values().cloned().collect();
    units.sort_by_key(|u| u.id);
    assert_eq!(units, snapshot.units);
    assert_eq!(replica.balances, snapshot.balances);
    assert_eq!(replica.current, snapshot.current);
}

#[test]
fn requests_survive_their_wire_encoding() {
    let deploy = SBPacket::Deploy(Deploy {
        kind: UnitKind::Jeep,
        col: 2,
        row: 4,
    });
    let bytes = bincode::serialize(&deploy).unwrap();
    assert!(matches!(
        bincode::deserialize::<SBPacket>(&bytes).unwrap(),
        SBPacket::Deploy(Deploy {
            kind: UnitKind::Jeep,
            col: 2,
            row: 4,
        })
    ));

    let rejected = CBPacket::Rejected(Rejected {
        reason: "waiting for opponent".to_string(),
    });
    let bytes = bincode::serialize(&rejected).unwrap();
    assert!(matches!(
        bincode::deserialize::<CBPacket>(&bytes).unwrap(),
        CBPacket::Rejected(r) if r.reason == "waiting for opponent"
    ));
}

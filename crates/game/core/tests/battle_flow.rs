//! End-to-end state machine flows: player input, cancellation, rotation,
//! AI turns and victory.

use game_core::{
    BattleEngine, BattleEvent, BattleState, Command, Controller, Field, FixedRng, GameConfig,
    Input, InventoryError, Item, Location, PcgRng, Phase, RangeSet, Side, SideId, StatKind,
    TerrainKind, TransitionError, Unit, UnitId, UnitStats, Weapon, WeaponKind,
};

fn sword() -> Weapon {
    Weapon::new("Iron Sword", WeaponKind::Sword, 5, 5, RangeSet::melee()).with_level("Iron")
}

fn bow() -> Weapon {
    Weapon::new("Iron Bow", WeaponKind::Bow, 6, 5, RangeSet::from([2])).with_level("Iron")
}

fn axe() -> Weapon {
    Weapon::new("Iron Axe", WeaponKind::Axe, 8, 10, RangeSet::melee()).with_level("Iron")
}

fn stats(hp: i32, strength: i32, defense: i32, skill: i32, speed: i32, movement: i32) -> UnitStats {
    UnitStats {
        level: 1,
        exp: 0,
        hp_max: hp,
        strength,
        defense,
        skill,
        speed,
        movement,
    }
}

fn hero(at: Location) -> Unit {
    Unit::new(UnitId(1), "Hero", SideId(0), at, stats(20, 6, 2, 5, 5, 3))
        .with_wieldable([WeaponKind::Sword, WeaponKind::Bow])
        .with_weapon(sword())
        .unwrap()
        .with_weapon(bow())
        .unwrap()
        .with_item(Item::new("Vulnerary", StatKind::Hp, 10, 1))
        .unwrap()
}

fn archer(at: Location) -> Unit {
    Unit::new(UnitId(4), "Archer", SideId(0), at, stats(15, 4, 1, 6, 4, 3))
        .with_wieldable([WeaponKind::Bow])
        .with_weapon(bow())
        .unwrap()
}

fn brigand(id: u32, at: Location, hp: i32) -> Unit {
    Unit::new(UnitId(id), "Brigand", SideId(1), at, stats(hp, 5, 1, 3, 3, 3))
        .with_wieldable([WeaponKind::Axe])
        .with_weapon(axe())
        .unwrap()
}

fn skirmish() -> BattleState {
    BattleState::new(
        Field::filled(5, 5, TerrainKind::Plain),
        vec![
            Side::new(SideId(0), Controller::Human)
                .with_units([hero(Location::new(0, 0)), archer(Location::new(0, 4))]),
            Side::new(SideId(1), Controller::Ai).with_units([
                brigand(2, Location::new(3, 0), 18),
                brigand(3, Location::new(4, 4), 18),
            ]),
        ],
    )
    .unwrap()
}

fn tile(x: i32, y: i32) -> Input {
    Input::Tile(Location::new(x, y))
}

#[test]
fn player_strike_resolves_with_counter() {
    let mut state = skirmish();
    let config = GameConfig::default();
    let rng = FixedRng(0);
    let mut engine = BattleEngine::new(&mut state, &rng, &config);

    engine.confirm(tile(0, 0)).unwrap();
    assert_eq!(engine.phase(), Phase::UnitSelected { unit: UnitId(1) });

    let events = engine.confirm(tile(2, 0)).unwrap();
    assert_eq!(
        events,
        vec![BattleEvent::UnitMoved {
            unit: UnitId(1),
            from: Location::new(0, 0),
            to: Location::new(2, 0)
        }]
    );

    engine.confirm(Input::Command(Command::Attack)).unwrap();
    engine.confirm(Input::Weapon(0)).unwrap();
    let events = engine.confirm(tile(3, 0)).unwrap();
    let BattleEvent::TargetChosen { forecast, .. } = &events[0] else {
        panic!("expected a forecast, got {events:?}");
    };
    assert_eq!(forecast.hit_chance, 100);
    assert_eq!(forecast.damage, 10);
    let counter = forecast.counter.expect("brigand can strike back");
    assert_eq!(counter.hit_chance, 81);
    assert_eq!(counter.damage, 11);

    let events = engine.confirm(Input::Proceed).unwrap();
    assert!(matches!(&events[0], BattleEvent::StrikeResolved(outcome) if outcome.hit && outcome.damage == 10));
    assert!(events.contains(&BattleEvent::ExperienceGained {
        unit: UnitId(1),
        amount: 15,
        exp: 15
    }));
    assert!(matches!(engine.phase(), Phase::StrikeInProgress { .. }));

    let events = engine.confirm(Input::Proceed).unwrap();
    assert!(matches!(&events[0], BattleEvent::StrikeResolved(outcome) if outcome.counter && outcome.damage == 11));
    // Counters never earn experience.
    assert!(!events.iter().any(|e| matches!(e, BattleEvent::ExperienceGained { .. })));
    assert_eq!(engine.phase(), Phase::Idle);

    let state = engine.state();
    assert_eq!(state.unit(UnitId(1)).unwrap().hp(), 9);
    assert_eq!(state.unit(UnitId(2)).unwrap().hp(), 8);
    assert!(!state.unit(UnitId(1)).unwrap().enabled);
    assert_eq!(state.current_side, SideId(0));
    assert_eq!(state.field.occupant_side(Location::new(2, 0)), Some(SideId(0)));
    assert!(state.field.is_empty(Location::new(0, 0)));
}

#[test]
fn waiting_last_unit_hands_over_to_the_ai() {
    let mut state = skirmish();
    let config = GameConfig::default();
    let rng = FixedRng(0);
    let mut engine = BattleEngine::new(&mut state, &rng, &config);

    for input in [
        tile(0, 0),
        tile(2, 0),
        Input::Command(Command::Attack),
        Input::Weapon(0),
        tile(3, 0),
        Input::Proceed,
        Input::Proceed,
    ] {
        engine.confirm(input).unwrap();
    }

    engine.confirm(tile(0, 4)).unwrap();
    engine.confirm(tile(0, 4)).unwrap();
    let events = engine.confirm(Input::Command(Command::Wait)).unwrap();

    assert_eq!(events[0], BattleEvent::UnitWaited { unit: UnitId(4) });
    assert!(events.contains(&BattleEvent::TurnPassed {
        from: SideId(0),
        to: SideId(1),
        turn: 1
    }));
    // The wounded hero is struck down from where the brigand stands.
    assert!(events.contains(&BattleEvent::UnitFell {
        unit: UnitId(1),
        side: SideId(0),
        location: Location::new(2, 0)
    }));
    assert!(events.contains(&BattleEvent::UnitMoved {
        unit: UnitId(3),
        from: Location::new(4, 4),
        to: Location::new(1, 4)
    }));
    assert_eq!(
        events.last(),
        Some(&BattleEvent::TurnPassed {
            from: SideId(1),
            to: SideId(0),
            turn: 2
        })
    );

    let state = engine.state();
    assert_eq!(state.unit(UnitId(4)).unwrap().hp(), 3);
    assert!(state.field.is_empty(Location::new(2, 0)));
    assert!(state.sides[1].units.iter().all(|unit| unit.enabled));
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.turn(), 2);
}

#[test]
fn cancel_reverses_each_step() {
    let mut state = skirmish();
    let config = GameConfig::default();
    let rng = FixedRng(0);
    let mut engine = BattleEngine::new(&mut state, &rng, &config);

    engine.confirm(tile(0, 0)).unwrap();
    engine.confirm(tile(1, 1)).unwrap();
    let events = engine.cancel().unwrap();
    assert_eq!(
        events,
        vec![BattleEvent::MoveUndone {
            unit: UnitId(1),
            from: Location::new(1, 1),
            to: Location::new(0, 0)
        }]
    );
    assert_eq!(engine.phase(), Phase::UnitSelected { unit: UnitId(1) });
    assert_eq!(engine.state().field.occupant_side(Location::new(0, 0)), Some(SideId(0)));
    assert!(engine.state().field.is_empty(Location::new(1, 1)));

    engine.confirm(tile(2, 0)).unwrap();
    engine.confirm(Input::Command(Command::Attack)).unwrap();
    engine.confirm(Input::Weapon(1)).unwrap();
    let order: Vec<_> = engine.state().unit(UnitId(1)).unwrap().weapons().iter().map(|w| w.name.clone()).collect();
    assert_eq!(order, ["Iron Bow", "Iron Sword"]);

    // The bow cannot reach an adjacent brigand.
    let before = engine.state().clone();
    assert_eq!(
        engine.confirm(tile(3, 0)),
        Err(TransitionError::InvalidTarget {
            location: Location::new(3, 0)
        })
    );
    assert_eq!(engine.state(), &before);

    engine.cancel().unwrap();
    assert_eq!(engine.phase(), Phase::WeaponMenu { unit: UnitId(1) });
    let order: Vec<_> = engine.state().unit(UnitId(1)).unwrap().weapons().iter().map(|w| w.name.clone()).collect();
    assert_eq!(order, ["Iron Sword", "Iron Bow"]);

    engine.cancel().unwrap();
    assert_eq!(engine.phase(), Phase::UnitMoved { unit: UnitId(1) });
    engine.cancel().unwrap();
    engine.cancel().unwrap();
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.state().unit(UnitId(1)).unwrap().location, Location::new(0, 0));
    assert!(matches!(engine.cancel(), Err(TransitionError::NothingToCancel { .. })));
}

#[test]
fn rejected_inputs_leave_state_untouched() {
    let mut state = skirmish();
    let config = GameConfig::default();
    let rng = FixedRng(0);
    let mut engine = BattleEngine::new(&mut state, &rng, &config);
    let before = engine.state().clone();

    assert!(matches!(
        engine.confirm(Input::Proceed),
        Err(TransitionError::WrongPhase { .. })
    ));
    assert!(matches!(
        engine.confirm(tile(3, 0)),
        Err(TransitionError::NotSelectable { .. })
    ));
    assert_eq!(
        engine.confirm(tile(2, 2)),
        Err(TransitionError::NoUnitAt {
            location: Location::new(2, 2)
        })
    );
    assert_eq!(engine.state(), &before);

    engine.confirm(tile(0, 0)).unwrap();
    let selected = engine.state().clone();
    assert!(matches!(
        engine.confirm(tile(4, 4)),
        Err(TransitionError::UnreachableTile { .. })
    ));
    assert!(matches!(engine.end_turn(), Err(TransitionError::WrongPhase { .. })));
    assert_eq!(engine.state(), &selected);
}

#[test]
fn allies_can_be_crossed_but_not_stopped_on() {
    let mut state = BattleState::new(
        Field::filled(4, 1, TerrainKind::Plain),
        vec![
            Side::new(SideId(0), Controller::Human)
                .with_units([hero(Location::new(0, 0)), archer(Location::new(1, 0))]),
            Side::new(SideId(1), Controller::Ai).with_units([brigand(2, Location::new(3, 0), 18)]),
        ],
    )
    .unwrap();
    let config = GameConfig::default();
    let rng = FixedRng(0);
    let mut engine = BattleEngine::new(&mut state, &rng, &config);

    engine.confirm(tile(0, 0)).unwrap();
    assert!(matches!(
        engine.confirm(tile(1, 0)),
        Err(TransitionError::UnreachableTile { .. })
    ));
    engine.confirm(tile(2, 0)).unwrap();
    assert_eq!(engine.state().unit(UnitId(1)).unwrap().location, Location::new(2, 0));
}

#[test]
fn item_menu_swaps_weapons_and_uses_items() {
    let mut state = skirmish();
    state.unit_mut(UnitId(1)).unwrap().apply_damage(15);
    let config = GameConfig::default();
    let rng = FixedRng(0);
    let mut engine = BattleEngine::new(&mut state, &rng, &config);

    engine.confirm(tile(0, 0)).unwrap();
    engine.confirm(tile(0, 0)).unwrap();
    engine.confirm(Input::Command(Command::Item)).unwrap();
    engine.confirm(Input::Weapon(1)).unwrap();
    assert_eq!(engine.phase(), Phase::ItemMenu { unit: UnitId(1) });

    let before = engine.state().clone();
    assert_eq!(
        engine.confirm(Input::Item(2)),
        Err(TransitionError::Inventory(InventoryError::EmptySlot { slot: 2 }))
    );
    assert_eq!(engine.state(), &before);

    let events = engine.confirm(Input::Item(0)).unwrap();
    let BattleEvent::ItemUsed { usage, .. } = &events[0] else {
        panic!("expected item use, got {events:?}");
    };
    assert!(usage.consumed);

    let hero = engine.state().unit(UnitId(1)).unwrap();
    assert_eq!(hero.hp(), 15);
    assert!(hero.items().is_empty());
    assert_eq!(hero.primary_weapon().unwrap().name, "Iron Bow");
    assert!(!hero.enabled);
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn rotation_skips_defeated_sides_and_counts_turns() {
    let mut fallen = brigand(2, Location::new(2, 2), 10);
    fallen.apply_damage(10);
    let mut state = BattleState::new(
        Field::filled(5, 5, TerrainKind::Plain),
        vec![
            Side::new(SideId(0), Controller::Human).with_units([hero(Location::new(0, 0))]),
            Side::new(SideId(1), Controller::Human).with_units([fallen]),
            Side::new(SideId(2), Controller::Human).with_units([Unit::new(
                UnitId(5),
                "Knight",
                SideId(2),
                Location::new(4, 4),
                stats(20, 5, 5, 5, 5, 3),
            )]),
        ],
    )
    .unwrap();
    let config = GameConfig::default();
    let rng = FixedRng(0);
    let mut engine = BattleEngine::new(&mut state, &rng, &config);

    let events = engine.end_turn().unwrap();
    assert_eq!(
        events,
        vec![BattleEvent::TurnPassed {
            from: SideId(0),
            to: SideId(2),
            turn: 1
        }]
    );
    let events = engine.end_turn().unwrap();
    assert_eq!(
        events,
        vec![BattleEvent::TurnPassed {
            from: SideId(2),
            to: SideId(0),
            turn: 2
        }]
    );
    assert_eq!(engine.victor(), None);
}

#[test]
fn last_enemy_falling_concludes_the_battle() {
    let mut state = BattleState::new(
        Field::filled(5, 5, TerrainKind::Plain),
        vec![
            Side::new(SideId(0), Controller::Human).with_units([hero(Location::new(0, 0))]),
            Side::new(SideId(1), Controller::Ai).with_units([brigand(2, Location::new(1, 0), 5)]),
        ],
    )
    .unwrap();
    let config = GameConfig::default();
    let rng = FixedRng(0);
    let mut engine = BattleEngine::new(&mut state, &rng, &config);

    for input in [
        tile(0, 0),
        tile(0, 0),
        Input::Command(Command::Attack),
        Input::Weapon(0),
        tile(1, 0),
    ] {
        engine.confirm(input).unwrap();
    }
    let events = engine.confirm(Input::Proceed).unwrap();
    assert!(events.contains(&BattleEvent::UnitFell {
        unit: UnitId(2),
        side: SideId(1),
        location: Location::new(1, 0)
    }));
    // Lethal strike: 10 + 5 (weight) + 15.
    assert!(events.contains(&BattleEvent::ExperienceGained {
        unit: UnitId(1),
        amount: 30,
        exp: 30
    }));
    assert!(engine.state().field.is_empty(Location::new(1, 0)));

    let events = engine.confirm(Input::Proceed).unwrap();
    assert_eq!(events, vec![BattleEvent::Victory { side: SideId(0) }]);
    assert_eq!(engine.phase(), Phase::Concluded { victor: SideId(0) });
    assert_eq!(
        engine.confirm(tile(0, 0)),
        Err(TransitionError::Concluded { victor: SideId(0) })
    );
    assert!(engine.end_turn().is_err());
}

#[test]
fn seeded_battles_replay_identically() {
    fn play(seed: u64) -> (Vec<BattleEvent>, BattleState) {
        let mut state = skirmish().with_seed(seed);
        state.sides[0].controller = Controller::Ai;
        let config = GameConfig::default().with_human_sides([]);
        let rng = PcgRng;
        let mut engine = BattleEngine::new(&mut state, &rng, &config);

        let mut log = Vec::new();
        for _ in 0..20 {
            if engine.phase().is_concluded() {
                break;
            }
            log.extend(engine.run_ai_side().unwrap());
        }
        drop(engine);
        (log, state)
    }

    let (first_log, first_state) = play(7);
    let (second_log, second_state) = play(7);
    assert!(!first_log.is_empty());
    assert_eq!(first_log, second_log);
    assert_eq!(first_state, second_state);
}

use proptest::prelude::*;
use quest_board::core::audit::audit;
use quest_board::core::party;
use quest_board::domain::model::{QuestDraft, QuestPhase, Verdict};
use quest_board::{QuestBoard, QuestError};

proptest! {
    #[test]
    fn acceptable_iff_index_within_band(
        budget in 0_i64..500_000,
        hours in 1_u32..100,
        price in 1_i64..10_000,
    ) {
        let report = audit(budget, f64::from(hours), price);
        let ratio = budget as f64 / (f64::from(hours) * price as f64);
        prop_assert_eq!(
            report.verdict == Verdict::Acceptable,
            (0.5..=3.0).contains(&ratio)
        );
    }

    #[test]
    fn non_positive_price_is_underpriced(
        budget in 0_i64..500_000,
        hours in 1_u32..100,
        price in -5_000_i64..=0,
    ) {
        let report = audit(budget, f64::from(hours), price);
        prop_assert_eq!(report.distortion_index, 0.0);
        prop_assert_eq!(report.verdict, Verdict::Underpriced);
    }

    #[test]
    fn party_never_exceeds_budget(
        hours in 1_u32..4,
        recruits in prop::collection::vec(1_u32..=4, 0..12),
    ) {
        let mut board = QuestBoard::new(2500);
        let budget = i64::from(hours) * 2500;
        let draft = QuestDraft {
            title: "Property quest".to_string(),
            hours: f64::from(hours),
            budget,
            req_int: 5,
            req_str: 2,
        };
        board.create_quest(&draft).unwrap();

        for id in recruits {
            let before = board.party().clone();
            match board.recruit(id) {
                Ok(_) => {}
                Err(QuestError::BudgetExceeded { .. })
                | Err(QuestError::AlreadyRecruited { .. }) => {
                    prop_assert_eq!(board.party(), &before);
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
            prop_assert!(board.party().total_fees() <= budget);
            prop_assert!(board.party().len() <= 4);
        }
    }

    #[test]
    fn lifecycle_never_moves_backward(ops in prop::collection::vec(0_u8..5, 0..30)) {
        let mut board = QuestBoard::new(2500);
        let draft = QuestDraft {
            title: "Monotonic quest".to_string(),
            hours: 10.0,
            budget: 25000,
            req_int: 5,
            req_str: 2,
        };
        board.create_quest(&draft).unwrap();

        let rank = |phase: QuestPhase| match phase {
            QuestPhase::Recruiting => 0,
            QuestPhase::Active => 1,
            QuestPhase::Cleared => 2,
            QuestPhase::Absent => 3,
        };
        let mut last = rank(board.phase());
        let mut credited = 0;

        for op in ops {
            let before = board.phase();
            let power_ok = board.win_rate().map(|r| r >= 1.0).unwrap_or(false);
            let result = match op {
                0 => board.recruit(1).map(|_| ()),
                1 => board.recruit(2).map(|_| ()),
                2 => board.depart().map(|_| ()),
                3 => board.complete_quest().map(|_| ()),
                _ => board.settle().map(|s| credited += s.remainder),
            };

            if op == 2 && result.is_ok() {
                prop_assert!(before == QuestPhase::Recruiting && power_ok);
            }

            let now = rank(board.phase());
            prop_assert!(now >= last);
            prop_assert!(now - last <= 1);
            last = now;
        }

        prop_assert_eq!(board.wallet().balance(), credited);
        prop_assert!(credited == 0 || credited == 21200);
    }

    #[test]
    fn settlement_remainder_never_negative(
        hours in 1_u32..20,
        ratio_pct in 50_i64..=300,
        req_int in 0_u8..=10,
        req_str in 0_u8..=10,
        recruits in prop::collection::vec(1_u32..=4, 0..10),
    ) {
        let mut board = QuestBoard::new(2500);
        // 指數落在 [0.5, 3.0]，一定通過審核
        let budget = i64::from(hours) * 2500 * ratio_pct / 100;
        let draft = QuestDraft {
            title: "Random quest".to_string(),
            hours: f64::from(hours),
            budget,
            req_int,
            req_str,
        };
        board.create_quest(&draft).unwrap();

        for id in recruits {
            let _ = board.recruit(id);
        }
        let fees = board.party().total_fees();

        match board.depart() {
            Ok(_) => {
                board.complete_quest().unwrap();
                let settlement = board.settle().unwrap();

                prop_assert!(settlement.remainder >= 0);
                prop_assert_eq!(settlement.remainder, budget - fees);
                prop_assert_eq!(board.wallet().balance(), settlement.remainder);
                prop_assert!(board.party().is_empty());
                prop_assert_eq!(board.phase(), QuestPhase::Absent);
            }
            Err(QuestError::InsufficientPower { win_rate }) => {
                prop_assert!(win_rate < 1.0);
                prop_assert_eq!(board.phase(), QuestPhase::Recruiting);
                prop_assert_eq!(board.wallet().balance(), 0);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn win_rate_is_capped(req_int in 0_u8..=10, req_str in 0_u8..=10) {
        let mut board = QuestBoard::new(2500);
        let draft = QuestDraft {
            title: "Capped".to_string(),
            hours: 10.0,
            budget: 25000,
            req_int,
            req_str,
        };
        board.create_quest(&draft).unwrap();
        for id in 1..=4 {
            board.recruit(id).unwrap();
        }
        let quest = board.quest().unwrap();
        let rate = party::win_rate(board.party(), quest);
        prop_assert!((0.0..=1.0).contains(&rate));
        // 全員合計 470 戰力，門檻最多 400
        prop_assert_eq!(rate, 1.0);
    }
}

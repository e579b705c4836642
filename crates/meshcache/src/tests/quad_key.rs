#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::Rng;

    use crate::{QuadKey, QuadKeyError, MAX_LEVEL_OF_DETAIL};

    #[test]
    fn test_display_one_digit_per_level() {
        // x = 0b011, y = 0b101
        let key = QuadKey::new(3, 3, 5).unwrap();
        assert_eq!(key.to_string(), "213");
        assert_eq!(QuadKey::new(0, 0, 0).unwrap().to_string(), "");
    }

    #[test]
    fn test_parse_matches_display() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let lod = rng.gen_range(1..=MAX_LEVEL_OF_DETAIL);
            let max = 1u32 << lod;
            let key = QuadKey::new(lod, rng.gen_range(0..max), rng.gen_range(0..max)).unwrap();

            let parsed: QuadKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "0142".parse::<QuadKey>(),
            Err(QuadKeyError::InvalidDigit {
                quad_key: "0142".to_string(),
                digit: '4',
            })
        );

        let deep = "1".repeat(MAX_LEVEL_OF_DETAIL as usize + 1);
        assert_eq!(
            deep.parse::<QuadKey>(),
            Err(QuadKeyError::TooDeep(MAX_LEVEL_OF_DETAIL as usize + 1))
        );
    }

    #[test]
    fn test_new_rejects_tiles_outside_level() {
        // 5 = 0b101 would alias tile 1 at level 1
        assert_eq!(
            QuadKey::new(1, 5, 0),
            Err(QuadKeyError::OutOfRange {
                level_of_detail: 1,
                tile_x: 5,
                tile_y: 0,
            })
        );
        assert!(QuadKey::new(1, 0, 2).is_err());
        assert!(QuadKey::new(0, 1, 0).is_err());
        assert!(QuadKey::new(1, 1, 1).is_ok());
    }

    #[test]
    fn test_new_rejects_levels_past_max() {
        assert_eq!(QuadKey::new(40, 0, 0), Err(QuadKeyError::TooDeep(40)));
        assert_eq!(QuadKey::new(255, 0, 0), Err(QuadKeyError::TooDeep(255)));
        assert_eq!(
            QuadKey::new(MAX_LEVEL_OF_DETAIL + 1, 0, 0),
            Err(QuadKeyError::TooDeep(MAX_LEVEL_OF_DETAIL as usize + 1))
        );

        let max = (1u32 << MAX_LEVEL_OF_DETAIL) - 1;
        let deepest = QuadKey::new(MAX_LEVEL_OF_DETAIL, max, max).unwrap();
        assert_eq!(deepest.to_string(), "3".repeat(MAX_LEVEL_OF_DETAIL as usize));
    }

    #[test]
    fn test_distinct_keys_have_distinct_strings() {
        let keys: Vec<QuadKey> = (0..8u32)
            .flat_map(|x| (0..8u32).map(move |y| QuadKey::new(3, x, y).unwrap()))
            .collect();
        let strings: HashSet<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(strings.len(), keys.len());
    }

    #[test]
    fn test_ordering_is_structural() {
        let a = QuadKey::new(1, 1, 1).unwrap();
        let b = QuadKey::new(2, 0, 0).unwrap();
        let c = QuadKey::new(2, 0, 1).unwrap();
        assert!(a < b);
        assert!(b < c);
        assert_eq!(c, "02".parse().unwrap());
        assert_eq!((c.level_of_detail(), c.tile_x(), c.tile_y()), (2, 0, 1));
    }
}

use super::*;

/// Deals a uniformly shuffled board using a Fisher–Yates pass over the paired faces.
#[derive(Debug)]
pub struct RandomDealGenerator<'a, R> {
    rng: &'a mut R,
}

impl<'a, R: rand::Rng> RandomDealGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: rand::Rng> DealGenerator for RandomDealGenerator<'_, R> {
    fn generate(self, config: &BoardConfig) -> Result<Deal> {
        config.validate()?;
        let mut faces = Deal::ordered_faces(config);

        for i in (1..faces.len()).rev() {
            let j = self.rng.random_range(0..=i);
            faces.swap(i, j);
        }

        log::trace!("shuffled faces: {:?}", faces);
        let shape: (usize, usize) = (config.rows.into(), config.columns.into());
        let faces = Array2::from_shape_vec(shape, faces).map_err(|_| GameError::InvalidDeal)?;
        Ok(Deal { faces })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn config() -> BoardConfig {
        BoardConfig::new(3, 4).unwrap()
    }

    #[test]
    fn same_seed_deals_same_layout() {
        let config = config();
        let a = RandomDealGenerator::new(&mut SmallRng::seed_from_u64(7)).generate(&config).unwrap();
        let b = RandomDealGenerator::new(&mut SmallRng::seed_from_u64(7)).generate(&config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn every_face_appears_exactly_twice() {
        let config = config();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..50 {
            let deal = RandomDealGenerator::new(&mut rng).generate(&config).unwrap();
            let mut faces: Vec<_> = deal.faces().collect();
            faces.sort_unstable();

            assert_eq!(faces, Deal::ordered_faces(&config));
            assert_eq!(faces.len() / 2, usize::from(config.total_pairs()));
        }
    }

    #[test]
    fn shuffles_actually_vary() {
        let config = config();
        let mut rng = SmallRng::seed_from_u64(1);
        let first = RandomDealGenerator::new(&mut rng).generate(&config).unwrap();

        let differs = (0..20).any(|_| RandomDealGenerator::new(&mut rng).generate(&config).unwrap() != first);
        assert!(differs);
    }

    #[test]
    fn odd_or_empty_configs_are_rejected_instead_of_dealt() {
        let mut rng = SmallRng::seed_from_u64(0);
        let odd = BoardConfig {
            rows: 3,
            ..BoardConfig::default()
        };
        let empty = BoardConfig {
            columns: 0,
            ..BoardConfig::default()
        };

        assert_eq!(
            RandomDealGenerator::new(&mut rng).generate(&odd),
            Err(GameError::OddCardCount)
        );
        assert_eq!(
            RandomDealGenerator::new(&mut rng).generate(&empty),
            Err(GameError::EmptyGrid)
        );
    }
}

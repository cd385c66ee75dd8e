use anchor_lang::prelude::*;

use crate::{
    error::AuctionError,
    fhe::{select, Euint32, FheOps},
};

/// Encrypted maximum of `bids` and the smallest index holding it.
///
/// Every step issues one comparison and two selects no matter what the bids
/// decrypt to. The comparison is strict, so a later bid equal to the running
/// maximum never displaces it.
pub fn oblivious_argmax<F: FheOps + ?Sized>(
    fhe: &mut F,
    bids: &[Euint32],
) -> Result<(Euint32, Euint32)> {
    let (first, rest) = bids.split_first().ok_or(AuctionError::NoBids)?;

    let mut max_bid = *first;
    let mut winner_index = fhe.as_euint32(0)?;

    for (offset, bid) in rest.iter().enumerate() {
        let index = u32::try_from(offset + 1).map_err(|_| error!(AuctionError::TooManyBidders))?;

        let is_greater = fhe.e_gt(*bid, max_bid)?;
        max_bid = select(fhe, is_greater, *bid, max_bid)?;
        winner_index = select(fhe, is_greater, index, winner_index)?;
    }

    Ok((max_bid, winner_index))
}

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng};

    use super::*;
    use crate::fhe::ShadowFhe;

    fn run(values: &[u32]) -> (u32, u32, ShadowFhe) {
        let mut fhe = ShadowFhe::new();
        let me = Pubkey::new_unique();
        let bids = values
            .iter()
            .map(|value| {
                let (ciphertext, proof) = ShadowFhe::encrypt_input(*value);
                fhe.new_euint32(&ciphertext, &proof).unwrap()
            })
            .collect::<Vec<_>>();

        let (max_bid, winner_index) = oblivious_argmax(&mut fhe, &bids).unwrap();
        fhe.allow(max_bid.0, me).unwrap();
        fhe.allow(winner_index.0, me).unwrap();
        let max_bid = fhe.decrypt(max_bid.0, &me).unwrap();
        let winner_index = fhe.decrypt(winner_index.0, &me).unwrap();
        (max_bid, winner_index, fhe)
    }

    #[test]
    fn finds_highest_bid() {
        let (max_bid, winner_index, _) = run(&[1000, 1500, 800]);
        assert_eq!(max_bid, 1500);
        assert_eq!(winner_index, 1);
    }

    #[test]
    fn earliest_bid_wins_ties() {
        let (max_bid, winner_index, _) = run(&[1000, 1000]);
        assert_eq!((max_bid, winner_index), (1000, 0));

        let (max_bid, winner_index, _) = run(&[5, 9, 2, 9, 9]);
        assert_eq!((max_bid, winner_index), (9, 1));
    }

    #[test]
    fn single_bid_wins() {
        let (max_bid, winner_index, _) = run(&[0]);
        assert_eq!((max_bid, winner_index), (0, 0));
    }

    #[test]
    fn operation_count_is_data_independent() {
        let (_, _, ascending) = run(&[1, 2, 3, 4, 5, 6]);
        let (_, _, descending) = run(&[6, 5, 4, 3, 2, 1]);
        let (_, _, flat) = run(&[7, 7, 7, 7, 7, 7]);

        let counts = ascending.op_counts();
        assert_eq!(counts, descending.op_counts());
        assert_eq!(counts, flat.op_counts());
        assert_eq!(counts.comparisons, 5);
        assert_eq!(counts.selects, 10);
        assert_eq!(counts.trivial, 6);
    }

    #[test]
    fn matches_plaintext_argmax_on_random_bids() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let len = rng.gen_range(1..24);
            // narrow range so ties are common
            let values = (0..len)
                .map(|_| rng.gen_range(0..16u32))
                .collect::<Vec<u32>>();

            let expected_max = *values.iter().max().unwrap();
            let expected_index = values.iter().position(|v| *v == expected_max).unwrap() as u32;

            let (max_bid, winner_index, _) = run(&values);
            assert_eq!(max_bid, expected_max, "bids {values:?}");
            assert_eq!(winner_index, expected_index, "bids {values:?}");
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut fhe = ShadowFhe::new();
        assert!(oblivious_argmax(&mut fhe, &[]).is_err());
    }
}

#[cfg(test)]
mod tests {
    use ark_bls12_381::{G1Affine, G2Affine};
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_serialize::CanonicalSerialize;
    use kzg_sidecar_primitives::{
        blob::Blob,
        commitment::{KzgCommitment, KzgProof},
        field::FieldElement,
        polynomial::evaluate_polynomial_in_evaluation_form,
    };
    use kzg_sidecar_verifier::{
        aggregate::{compute_aggregated_poly_and_commitment, compute_evaluation_point},
        errors::SidecarError,
        setup::SetupParameters,
        sidecar::{BlobsSidecar, SidecarVerifier, Slot},
        verify::verify_kzg_proof,
    };
    use lazy_static::lazy_static;
    use rand::{Rng, SeedableRng};

    const FIELD_ELEMENTS_PER_BLOB: usize = 8;
    const MAX_BLOBS_PER_BLOCK: usize = 4;
    const SLOT: Slot = Slot(4242);
    const BLOCK_ROOT: [u8; 32] = [0xab; 32];

    // Toy trusted setup whose secret is known, so tests can act as the prover.
    lazy_static! {
        static ref TAU: FieldElement = FieldElement::from_u64(0x1234_5678_9abc_def1);
        static ref PARAMS: SetupParameters = SetupParameters::new(
            FIELD_ELEMENTS_PER_BLOB,
            MAX_BLOBS_PER_BLOCK,
            (G2Affine::generator() * TAU.as_fr()).into_affine(),
        )
        .unwrap();
        static ref VERIFIER: SidecarVerifier = SidecarVerifier::new(PARAMS.clone());
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn g1_mul(scalar: &FieldElement) -> G1Affine {
        (G1Affine::generator() * scalar.as_fr()).into_affine()
    }

    // Raw random chunks, most of them above the modulus, so the reduction
    // path is exercised on both sides.
    fn random_blob<R: Rng>(rng: &mut R) -> Blob {
        let chunks: Vec<[u8; 32]> = (0..FIELD_ELEMENTS_PER_BLOB).map(|_| rng.gen()).collect();
        Blob::from_chunks(&chunks)
    }

    fn commit(blob: &Blob) -> KzgCommitment {
        let value = evaluate_polynomial_in_evaluation_form(
            &blob.to_field_elements(),
            &TAU,
            PARAMS.domain(),
        )
        .unwrap();
        KzgCommitment::from_point(&g1_mul(&value)).unwrap()
    }

    // Opens the aggregated polynomial at the Fiat-Shamir point, the way an
    // honest block producer would.
    fn prove(blobs: &[Blob], commitments: &[KzgCommitment]) -> KzgProof {
        let (poly, commitment) =
            compute_aggregated_poly_and_commitment(blobs, commitments, &PARAMS).unwrap();
        let x = compute_evaluation_point(&poly, &commitment, &PARAMS).unwrap();
        let y = poly.evaluate(&x, PARAMS.domain()).unwrap();
        let p_tau = poly.evaluate(&TAU, PARAMS.domain()).unwrap();

        let quotient = p_tau
            .sub_mod(&y)
            .mul_mod(&TAU.sub_mod(&x).inverse().unwrap());
        KzgCommitment::from_point(&g1_mul(&quotient)).unwrap()
    }

    fn valid_sidecar(blob_count: usize, seed: u64) -> (BlobsSidecar, Vec<KzgCommitment>) {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let blobs: Vec<Blob> = (0..blob_count).map(|_| random_blob(&mut rng)).collect();
        let kzgs: Vec<KzgCommitment> = blobs.iter().map(commit).collect();
        let proof = prove(&blobs, &kzgs);

        let sidecar = BlobsSidecar {
            beacon_block_root: BLOCK_ROOT,
            beacon_block_slot: SLOT,
            blobs,
            kzg_aggregated_proof: proof,
        };
        (sidecar, kzgs)
    }

    #[test]
    fn test_verify_single_blob() {
        init_tracing();
        let (sidecar, kzgs) = valid_sidecar(1, 1);
        assert_eq!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar),
            Ok(())
        );
    }

    #[test]
    fn test_verify_multiple_blobs() {
        init_tracing();
        for count in 2..=MAX_BLOBS_PER_BLOCK {
            let (sidecar, kzgs) = valid_sidecar(count, 100 + count as u64);
            assert_eq!(
                VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar),
                Ok(()),
                "{} blobs should verify",
                count
            );
        }
    }

    #[test]
    fn test_verification_is_repeatable() {
        let (sidecar, kzgs) = valid_sidecar(2, 2);
        for _ in 0..3 {
            assert!(VERIFIER
                .verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar)
                .is_ok());
        }
    }

    #[test]
    fn test_verify_from_many_threads() {
        let cases: Vec<_> = (0..4).map(|i| valid_sidecar(1 + i % 3, 300 + i as u64)).collect();

        std::thread::scope(|scope| {
            for (sidecar, kzgs) in &cases {
                scope.spawn(move || {
                    assert_eq!(
                        VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, kzgs, sidecar),
                        Ok(())
                    );
                });
            }
        });
    }

    #[test]
    fn test_slot_mismatch_comes_first() {
        init_tracing();
        let (mut sidecar, _) = valid_sidecar(1, 3);
        sidecar.kzg_aggregated_proof = KzgCommitment::new([0u8; 48]);

        // the garbage proof and missing commitments are never looked at
        assert_eq!(
            VERIFIER.verify_blobs_sidecar(Slot(7), &BLOCK_ROOT, &[], &sidecar),
            Err(SidecarError::SlotMismatch {
                expected: Slot(7),
                actual: SLOT
            })
        );
    }

    #[test]
    fn test_root_mismatch() {
        let (sidecar, kzgs) = valid_sidecar(1, 4);
        assert_eq!(
            VERIFIER.verify_blobs_sidecar(SLOT, &[0u8; 32], &kzgs, &sidecar),
            Err(SidecarError::RootMismatch)
        );
    }

    #[test]
    fn test_commitment_count_mismatch() {
        let (sidecar, kzgs) = valid_sidecar(2, 5);
        assert_eq!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs[..1], &sidecar),
            Err(SidecarError::LengthMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_empty_sidecar_is_rejected() {
        let (mut sidecar, _) = valid_sidecar(1, 6);
        sidecar.blobs.clear();
        assert!(matches!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &[], &sidecar),
            Err(SidecarError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_wrong_blob_width() {
        let (mut sidecar, kzgs) = valid_sidecar(1, 7);
        sidecar.blobs[0] = Blob::from_chunks(&[[1u8; 32]; FIELD_ELEMENTS_PER_BLOB / 2]);
        assert_eq!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar),
            Err(SidecarError::LengthMismatch {
                expected: FIELD_ELEMENTS_PER_BLOB,
                actual: FIELD_ELEMENTS_PER_BLOB / 2
            })
        );
    }

    #[test]
    fn test_tampered_blob_fails_pairing() {
        init_tracing();
        let (mut sidecar, kzgs) = valid_sidecar(2, 8);
        let mut chunks = sidecar.blobs[1].to_chunk_array();
        chunks[3][31] ^= 0x01;
        sidecar.blobs[1] = Blob::from_chunks(&chunks);

        assert_eq!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar),
            Err(SidecarError::ProofInvalid)
        );
    }

    #[test]
    fn test_swapped_commitments_fail_pairing() {
        let (sidecar, mut kzgs) = valid_sidecar(2, 9);
        kzgs.swap(0, 1);
        assert_eq!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar),
            Err(SidecarError::ProofInvalid)
        );
    }

    #[test]
    fn test_proof_for_other_sidecar_fails() {
        let (mut sidecar, kzgs) = valid_sidecar(1, 10);
        let (other, _) = valid_sidecar(1, 11);
        sidecar.kzg_aggregated_proof = other.kzg_aggregated_proof;
        assert_eq!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar),
            Err(SidecarError::ProofInvalid)
        );
    }

    #[test]
    fn test_undecodable_proof() {
        let (mut sidecar, kzgs) = valid_sidecar(1, 12);
        sidecar.kzg_aggregated_proof = KzgCommitment::new([0u8; 48]);
        assert!(matches!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar),
            Err(SidecarError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_undecodable_commitment() {
        init_tracing();
        let (sidecar, mut kzgs) = valid_sidecar(2, 13);
        kzgs[1] = KzgCommitment::new([0xff; 48]);
        let error = VERIFIER
            .verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar)
            .unwrap_err();
        assert!(matches!(error, SidecarError::InvalidEncoding(_)));
        assert!(!error.is_routine());
    }

    #[test]
    fn test_too_many_blobs() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(14);
        let blobs: Vec<Blob> = (0..MAX_BLOBS_PER_BLOCK + 1)
            .map(|_| random_blob(&mut rng))
            .collect();
        let kzgs: Vec<KzgCommitment> = blobs.iter().map(commit).collect();
        let sidecar = BlobsSidecar {
            beacon_block_root: BLOCK_ROOT,
            beacon_block_slot: SLOT,
            blobs,
            kzg_aggregated_proof: KzgCommitment::new([0u8; 48]),
        };

        assert!(matches!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar),
            Err(SidecarError::HashingFailure(_))
        ));
    }

    #[test]
    fn test_verify_kzg_proof_at_domain_point() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(15);
        let blob = random_blob(&mut rng);
        let commitment = commit(&blob);
        let evaluations = blob.to_field_elements();

        let index = 3;
        let z = PARAMS.domain()[index];
        let y = evaluations[index];
        let p_tau =
            evaluate_polynomial_in_evaluation_form(&evaluations, &TAU, PARAMS.domain()).unwrap();
        let quotient = p_tau
            .sub_mod(&y)
            .mul_mod(&TAU.sub_mod(&z).inverse().unwrap());
        let proof = KzgCommitment::from_point(&g1_mul(&quotient)).unwrap();

        assert!(verify_kzg_proof(&commitment, &z, &y, &proof, &PARAMS).unwrap());
        assert!(!verify_kzg_proof(
            &commitment,
            &z,
            &y.add_mod(&FieldElement::one()),
            &proof,
            &PARAMS
        )
        .unwrap());
        assert!(!verify_kzg_proof(&commitment, &PARAMS.domain()[0], &y, &proof, &PARAMS).unwrap());
    }

    #[test]
    fn test_zero_blob_opens_with_infinity() {
        let blob = Blob::from_chunks(&[[0u8; 32]; FIELD_ELEMENTS_PER_BLOB]);
        let kzgs = vec![commit(&blob)];
        assert!(kzgs[0].decode().unwrap().is_zero());

        let sidecar = BlobsSidecar {
            beacon_block_root: BLOCK_ROOT,
            beacon_block_slot: SLOT,
            kzg_aggregated_proof: prove(&[blob.clone()], &kzgs),
            blobs: vec![blob],
        };
        assert_eq!(
            VERIFIER.verify_blobs_sidecar(SLOT, &BLOCK_ROOT, &kzgs, &sidecar),
            Ok(())
        );
    }

    #[test]
    fn test_load_setup_from_file() {
        let mut bytes = Vec::new();
        PARAMS.g2_tau().serialize_compressed(&mut bytes).unwrap();
        let path = std::env::temp_dir().join(format!("sidecar-setup-{}.g2", std::process::id()));
        std::fs::write(&path, &bytes).unwrap();

        let loaded =
            SetupParameters::load(&path, FIELD_ELEMENTS_PER_BLOB, MAX_BLOBS_PER_BLOCK).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, *PARAMS);

        let truncated = std::env::temp_dir().join(format!("sidecar-short-{}.g2", std::process::id()));
        std::fs::write(&truncated, &bytes[..48]).unwrap();
        let result = SetupParameters::load(&truncated, FIELD_ELEMENTS_PER_BLOB, MAX_BLOBS_PER_BLOCK);
        std::fs::remove_file(&truncated).unwrap();
        assert!(result.is_err());
    }
}

// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

mod common;

#[cfg(feature = "integration")]
mod test_db {
    use chainview::{
        db::mongodb::collections::{AddressCollection, AddressDocument},
        model::BtcAddress,
    };

    use super::common::{setup, teardown};

    #[tokio::test]
    async fn address_record_round_trip() {
        let (db, collection) = setup::<AddressCollection>("chainview-test-addresses").await;

        let address: BtcAddress = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".parse().unwrap();
        assert_eq!(collection.get(&address).await.unwrap(), None);

        let document = AddressDocument::new(address.clone(), 5_002_467_735, 2);
        collection.insert(&document).await.unwrap();

        assert_eq!(collection.get(&address).await.unwrap(), Some(document));

        teardown(db).await;
    }

    #[tokio::test]
    async fn address_totals_updated_in_place() {
        let (db, collection) = setup::<AddressCollection>("chainview-test-address-totals").await;

        let address: BtcAddress = "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy".parse().unwrap();
        let document = AddressDocument::new(address.clone(), 1_000, 1);
        collection.insert(&document).await.unwrap();

        collection.update_totals(&address, 2_500, 3).await.unwrap();

        let updated = collection.get(&address).await.unwrap().unwrap();
        assert_eq!(updated.balance, 2_500);
        assert_eq!(updated.transaction_count, 3);
        assert!(updated.updated_at >= document.updated_at);

        teardown(db).await;
    }

    #[tokio::test]
    async fn duplicate_address_rejected() {
        let (db, collection) = setup::<AddressCollection>("chainview-test-address-dup").await;

        let address: BtcAddress = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".parse().unwrap();
        collection
            .insert(&AddressDocument::new(address.clone(), 1, 1))
            .await
            .unwrap();
        assert!(collection.insert(&AddressDocument::new(address, 2, 2)).await.is_err());

        teardown(db).await;
    }
}

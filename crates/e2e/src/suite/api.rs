//! Bookings API scenarios
//!
//! Smoke scenarios cover the operations everything else depends on
//! (liveness, token creation, create/read); regression scenarios cover the
//! rest of the CRUD surface and data isolation.

use anyhow::ensure;

use storecheck_common::{AuthOutcome, BookingDates, BookingPatch, Error};

use crate::fixtures;
use crate::scenario::{Project, Scenario};

/// The semantic failure string the service answers bad credentials with
const BAD_CREDENTIALS_REASON: &str = "Bad credentials";

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("api-ping-reachable", Project::Api, &["smoke"], |ctx| async move {
            ensure!(ctx.api().health_check().await, "ping endpoint unreachable");
            Ok(())
        }),
        Scenario::new("api-auth-valid-credentials", Project::Api, &["smoke"], |ctx| async move {
            let token = ctx.admin_token().await?;
            ensure!(!token.as_str().is_empty(), "token must be non-empty");
            Ok(())
        }),
        Scenario::new(
            "api-auth-bad-credentials",
            Project::Api,
            &["regression"],
            |ctx| async move {
                let username = ctx.unique_name("invalid_user");
                let password = ctx.unique_name("wrong_password");
                let outcome = ctx.api().authenticate(&username, &password).await?;
                match outcome {
                    AuthOutcome::Rejected { reason } => {
                        ensure!(
                            reason == BAD_CREDENTIALS_REASON,
                            "unexpected rejection reason: {}",
                            reason
                        );
                        Ok(())
                    }
                    AuthOutcome::Granted(_) => {
                        anyhow::bail!("invalid credentials must not yield a token")
                    }
                }
            },
        ),
        Scenario::new(
            "api-auth-token-repeatable",
            Project::Api,
            &["regression"],
            |ctx| async move {
                let first = ctx.admin_token().await?;
                let second = ctx.admin_token().await?;
                ensure!(!first.as_str().is_empty() && !second.as_str().is_empty());
                Ok(())
            },
        ),
        Scenario::new("api-create-booking", Project::Api, &["smoke"], |ctx| async move {
            let mut booking = fixtures::sample_booking();
            booking.first_name = ctx.unique_name("Create");

            let created = ctx.api().create_booking(&booking).await?;
            ctx.track_booking(created.id);

            ensure!(created.id > 0, "server must assign a positive id");
            ensure!(created.booking == booking, "stored booking must echo the request");
            Ok(())
        }),
        Scenario::new("api-get-after-create", Project::Api, &["smoke"], |ctx| async move {
            let mut booking = fixtures::sample_booking();
            booking.first_name = ctx.unique_name("Get");

            let created = ctx.api().create_booking(&booking).await?;
            ctx.track_booking(created.id);

            let fetched = ctx.api().get_booking(created.id).await?;
            ensure!(
                fetched == booking,
                "retrieved booking must match the submitted data field for field"
            );
            Ok(())
        }),
        Scenario::new("api-update-booking", Project::Api, &["regression"], |ctx| async move {
            let token = ctx.admin_token().await?;

            let mut initial = fixtures::sample_booking();
            initial.first_name = ctx.unique_name("Initial");
            let created = ctx.api().create_booking(&initial).await?;
            ctx.track_booking(created.id);

            let mut replacement = fixtures::extended_booking();
            replacement.first_name = ctx.unique_name("Updated");
            replacement.total_price = 999;
            replacement.dates = BookingDates {
                checkin: initial.dates.checkin,
                checkout: initial.dates.checkout,
            };

            let updated = ctx
                .api()
                .update_booking(created.id, &replacement, &token)
                .await?;
            ensure!(updated == replacement, "PUT must replace every field");

            let fetched = ctx.api().get_booking(created.id).await?;
            ensure!(fetched == replacement, "replacement must persist");
            Ok(())
        }),
        Scenario::new("api-patch-booking", Project::Api, &["regression"], |ctx| async move {
            let token = ctx.admin_token().await?;

            let mut initial = fixtures::sample_booking();
            initial.first_name = ctx.unique_name("PatchBefore");
            let created = ctx.api().create_booking(&initial).await?;
            ctx.track_booking(created.id);

            let patched_name = ctx.unique_name("PatchAfter");
            let patch = BookingPatch::default()
                .with_first_name(patched_name.clone())
                .with_total_price(777);
            let updated = ctx.api().patch_booking(created.id, &patch, &token).await?;

            ensure!(updated.first_name == patched_name);
            ensure!(updated.total_price == 777);
            // Untouched fields must come back unchanged.
            ensure!(updated.last_name == initial.last_name);
            ensure!(updated.deposit_paid == initial.deposit_paid);
            ensure!(updated.dates == initial.dates);
            ensure!(updated.additional_needs == initial.additional_needs);
            Ok(())
        }),
        Scenario::new("api-delete-booking", Project::Api, &["regression"], |ctx| async move {
            let token = ctx.admin_token().await?;

            let mut booking = fixtures::sample_booking();
            booking.first_name = ctx.unique_name("Delete");
            let created = ctx.api().create_booking(&booking).await?;

            let outcome = ctx.api().delete_booking(created.id, &token).await?;
            ensure!(outcome.is_deleted(), "delete must succeed for an existing id");

            match ctx.api().get_booking(created.id).await {
                Err(Error::NotFound { id }) => {
                    ensure!(id == created.id);
                    Ok(())
                }
                Ok(_) => anyhow::bail!("deleted booking must not be retrievable"),
                Err(err) => Err(err.into()),
            }
        }),
        Scenario::new(
            "api-bookings-isolated",
            Project::Api,
            &["regression"],
            |ctx| async move {
                let bookings = [
                    fixtures::sample_booking(),
                    fixtures::extended_booking(),
                    fixtures::minimal_booking(),
                ];

                let mut created = Vec::new();
                for (i, base) in bookings.iter().enumerate() {
                    let mut booking = base.clone();
                    booking.first_name = ctx.unique_name(&format!("Multi{}", i));
                    let response = ctx.api().create_booking(&booking).await?;
                    ctx.track_booking(response.id);
                    created.push((response.id, booking));
                }

                ensure!(
                    created[0].0 != created[1].0
                        && created[1].0 != created[2].0
                        && created[0].0 != created[2].0,
                    "ids must be distinct"
                );

                for (id, booking) in &created {
                    let fetched = ctx.api().get_booking(*id).await?;
                    ensure!(
                        fetched == *booking,
                        "each booking must match only its own submitted data"
                    );
                }
                Ok(())
            },
        ),
    ]
}

//! Integration tests for testimonial moderation over file storage.

use lingam_admin::models::NewTestimonial;
use lingam_integration_tests::TestContext;

#[tokio::test]
async fn test_moderation_survives_restart() {
    let ctx = TestContext::new().await;
    let testimonials = ctx.state.testimonials();

    let id = testimonials
        .create(NewTestimonial::new("Meera", "Beautiful jhumkas", 5.0))
        .await
        .expect("Failed to submit")
        .id;
    testimonials
        .toggle_approval(id)
        .await
        .expect("Failed to approve");
    testimonials
        .toggle_homepage(id)
        .await
        .expect("Failed to feature");

    let reloaded = ctx.reload().await;
    let homepage = reloaded.testimonials().list_homepage().await;
    assert_eq!(homepage.len(), 1);
    assert!(homepage[0].is_approved());

    reloaded
        .testimonials()
        .toggle_approval(id)
        .await
        .expect("Failed to revoke");
    let again = ctx.reload().await;
    assert!(again.testimonials().list_homepage().await.is_empty());
    assert!(again.testimonials().list_approved().await.is_empty());
    assert_eq!(again.testimonials().list_all().await.len(), 1);
}

#[tokio::test]
async fn test_stored_as_flags() {
    let ctx = TestContext::new().await;
    let id = ctx
        .state
        .testimonials()
        .create(NewTestimonial::new("Ravi", "Great service", 4.0))
        .await
        .expect("Failed to submit")
        .id;
    ctx.state
        .testimonials()
        .toggle_approval(id)
        .await
        .expect("Failed to approve");

    let raw = std::fs::read_to_string(ctx.data_dir().join("lingam-testimonials.json"))
        .expect("Collection file missing");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("Invalid JSON");
    assert_eq!(value[0]["customerName"], "Ravi");
    assert_eq!(value[0]["isApproved"], true);
    assert_eq!(value[0]["showOnHomepage"], false);
}

#[tokio::test]
async fn test_clear_all_removes_collection_file() {
    let ctx = TestContext::new().await;
    for name in ["A", "B", "C"] {
        ctx.state
            .testimonials()
            .create(NewTestimonial::new(name, "Lovely", 5.0))
            .await
            .expect("Failed to submit");
    }

    assert!(
        ctx.state
            .testimonials()
            .clear_all()
            .await
            .expect("Failed to clear")
    );
    assert!(!ctx.data_dir().join("lingam-testimonials.json").exists());
    assert!(ctx.reload().await.testimonials().list_all().await.is_empty());
}

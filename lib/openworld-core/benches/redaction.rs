use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use openworld_core::redaction::Redactions;
use serde_json::{Value, json};
use std::hint::black_box;

fn order_payload(payments: usize) -> Value {
    let payments = (0..payments)
        .map(|index| match index % 3 {
            0 => json!({
                "method": "CREDIT_CARD",
                "brand": "VISA",
                "card_number": "4111111111111111",
                "card_cvv_response": "M",
                "card_avs_response": "Y",
                "amount": {"value": 120.5, "currency_code": "USD"}
            }),
            1 => json!({
                "method": "GIFT_CARD",
                "brand": "GIFT_CARD",
                "card_number": "6006491234567890",
                "pin": "1234",
                "amount": {"value": 20, "currency_code": "USD"}
            }),
            _ => json!({
                "method": "DIRECT_DEBIT",
                "brand": "DIRECT_DEBIT",
                "routing_number": "021000021",
                "account_number": "000123456789",
                "amount": {"value": 42, "currency_code": "USD"}
            }),
        })
        .collect::<Vec<_>>();

    json!({
        "transaction": {
            "transaction_details": {
                "order_id": "1000000234",
                "current_order_status": "IN_PROGRESS",
                "order_type": "CREATE",
                "payments": payments
            },
            "travel_products": [
                {"type": "HOTEL", "price": {"value": 250, "currency_code": "USD"}, "hotel_id": "8883333999221"}
            ]
        }
    })
}

fn benchmark_redaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("redaction");
    let redactions = Redactions::default();

    for payments in [1, 3, 12] {
        let payload = order_payload(payments);
        group.bench_with_input(BenchmarkId::new("order", payments), &payload, |b, payload| {
            b.iter(|| black_box(redactions.redact(black_box(payload))));
        });
    }

    let untouched = json!({"type": "ORDER_UPDATE", "risk_id": "1234", "order_status": "COMPLETED"});
    group.bench_function("no_payment", |b| {
        b.iter(|| black_box(redactions.redact(black_box(&untouched))));
    });

    group.finish();
}

criterion_group!(benches, benchmark_redaction);
criterion_main!(benches);

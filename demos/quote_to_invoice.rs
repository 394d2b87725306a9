use std::env;
use std::path::PathBuf;

use devis::config::ConfigStore;
use devis::core::*;
use devis::generate_document;
use rust_decimal_macros::dec;

fn main() {
    // Keep the demo away from the real configuration file.
    let workdir = env::temp_dir().join("devis-demo");
    let store = ConfigStore::new(workdir.join("config.json"));
    store.set_company_name("Atelier Durand").unwrap();
    store.upsert_item("audit", "Audit de sécurité", dec!(450)).unwrap();

    let issuer = store.company().unwrap();
    let customer = PartyBuilder::new("Client SA")
        .address("5 place Bellecour, Lyon")
        .email("achats@client.example")
        .build();

    let service = store.item("service").unwrap().expect("default catalog item");
    let audit = store.item("audit").unwrap().expect("item just added");

    let quote = DocumentBuilder::new(DocumentType::Quote, issuer.clone(), customer)
        .number(store.next_document_number(DocumentType::Quote).unwrap())
        .subject("Mise en conformité")
        .validity_end_date(chrono::Local::now().date_naive() + chrono::Days::new(30))
        .notes("Acompte de 30 % à la commande.\nSolde à réception de la facture.")
        .add_line(
            LineItemBuilder::from_catalog(&service, dec!(12))
                .unit("h")
                .tax(dec!(20))
                .build(),
        )
        .add_line(
            LineItemBuilder::from_catalog(&audit, dec!(1))
                .discount(dec!(10))
                .tax(dec!(20))
                .build(),
        )
        .build()
        .expect("quote should be valid");

    let out_dir: PathBuf = workdir.join("documents");
    let files = generate_document(&quote, &out_dir).unwrap();
    print_document(&quote);
    println!("Written: {} / {}", files.json.display(), files.pdf.display());

    // The customer accepted: turn the exported record into an invoice.
    let (customer_name, lines) = devis::record::parse_quote_record(&files.json).unwrap();
    let invoice = DocumentBuilder::new(
        DocumentType::Invoice,
        issuer,
        PartyBuilder::new(customer_name).build(),
    )
    .number(store.next_document_number(DocumentType::Invoice).unwrap())
    .lines(lines)
    .build()
    .expect("invoice should be valid");

    let files = generate_document(&invoice, &out_dir).unwrap();
    print_document(&invoice);
    println!("Written: {} / {}", files.json.display(), files.pdf.display());
}

fn print_document(doc: &Document) {
    let totals = doc.totals();
    println!("{} {}", doc.doc_type.title(), doc.number.as_deref().unwrap_or("(draft)"));
    println!("Customer: {}", doc.customer.name);
    println!("---");
    for line in &doc.lines {
        println!(
            "  {} x {} @ {} (-{}%) = {}",
            line.quantity,
            line.display_description(),
            line.unit_price,
            line.discount_pct,
            line.total_ex_tax()
        );
    }
    println!("---");
    println!("Subtotal: {} €", totals.subtotal_ex_tax);
    println!("Tax:      {} €", totals.total_tax);
    println!("Net:      {} €", totals.net_payable);
}

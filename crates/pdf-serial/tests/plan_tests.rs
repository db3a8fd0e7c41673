use pdf_serial::*;

fn front(page_count: usize) -> Vec<Sheet> {
    plan_document(&SourceDocument::new("doc.pdf", page_count), Pass::Front)
        .unwrap()
        .sheets
}

fn back(page_count: usize) -> Vec<Sheet> {
    plan_document(&SourceDocument::new("doc.pdf", page_count), Pass::Back)
        .unwrap()
        .sheets
}

#[test]
fn test_sheet_planner_shape() {
    for p in 1..=101 {
        let sheets = plan_sheets(p).unwrap();
        assert_eq!(sheets.len(), p.div_ceil(2), "P={}", p);

        for (idx, sheet) in sheets.iter().enumerate() {
            let i = idx + 1;
            assert_eq!(sheet.left, Some(2 * i - 1), "P={} sheet {}", p, i);
        }

        let last = sheets.last().unwrap();
        assert_eq!(last.right.is_none(), p % 2 == 1, "P={}", p);
    }
}

#[test]
fn test_sheet_planner_is_pure() {
    for p in [1, 2, 7, 64] {
        assert_eq!(plan_sheets(p).unwrap(), plan_sheets(p).unwrap());
    }
}

#[test]
fn test_sheet_planner_rejects_zero() {
    match plan_sheets(0) {
        Err(SerialPrintError::InvalidPageCount { page_count: 0, .. }) => {}
        other => panic!("Expected InvalidPageCount, got {:?}", other),
    }
}

#[test]
fn test_pass_split_counts() {
    for p in 1usize..=101 {
        let n = p.div_ceil(2);
        let (f, b) = split_by_pass(&plan_sheets(p).unwrap());
        assert_eq!(f.len() + b.len(), n, "P={}", p);
        assert!(f.len() - b.len() <= 1, "P={}", p);
        assert_eq!(f.len() - b.len() == 1, n % 2 == 1, "P={}", p);
    }
}

#[test]
fn test_back_pass_blank_iff_front_longer() {
    for p in 1..=101 {
        let (f, b) = split_by_pass(&plan_sheets(p).unwrap());
        let back = back(p);
        let blanks = back.iter().filter(|s| s.is_blank()).count();

        if f.len() > b.len() {
            assert_eq!(blanks, 1, "P={}", p);
            assert_eq!(back.last(), Some(&Sheet::BLANK), "P={}", p);
        } else {
            assert_eq!(blanks, 0, "P={}", p);
        }
        // Both passes use the same amount of paper for every document
        assert_eq!(back.len(), front(p).len(), "P={}", p);
    }
}

#[test]
fn test_front_pass_never_pads() {
    for p in 1..=50 {
        assert!(front(p).iter().all(|s| !s.is_blank()), "P={}", p);
    }
}

#[test]
fn test_five_pages() {
    assert_eq!(front(5), vec![Sheet::full(1), Sheet::half(5)]);
    assert_eq!(back(5), vec![Sheet::full(3), Sheet::BLANK]);
}

#[test]
fn test_four_pages() {
    assert_eq!(front(4), vec![Sheet::full(1)]);
    assert_eq!(back(4), vec![Sheet::full(3)]);
}

#[test]
fn test_one_page() {
    assert_eq!(front(1), vec![Sheet::half(1)]);
    assert_eq!(back(1), vec![Sheet::BLANK]);
}

#[test]
fn test_batch_padding_is_local() {
    let documents = vec![
        SourceDocument::new("a.pdf", 5),
        SourceDocument::new("b.pdf", 4),
    ];

    let batch = align_batch(&documents, Pass::Back).unwrap();
    let sheets: Vec<Sheet> = batch.sheets().copied().collect();
    assert_eq!(sheets, vec![Sheet::full(3), Sheet::BLANK, Sheet::full(3)]);

    let batch = align_batch(&documents, Pass::Front).unwrap();
    let sheets: Vec<Sheet> = batch.sheets().copied().collect();
    assert_eq!(
        sheets,
        vec![Sheet::full(1), Sheet::half(5), Sheet::full(1)]
    );
}

#[test]
fn test_batch_preserves_order() {
    let documents = vec![
        SourceDocument::new("a.pdf", 3),
        SourceDocument::new("b.pdf", 9),
        SourceDocument::new("c.pdf", 1),
    ];

    for pass in [Pass::Front, Pass::Back] {
        let batch = align_batch(&documents, pass).unwrap();
        let names: Vec<&str> = batch.plans.iter().map(|p| p.document.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
        assert!(batch.plans.iter().all(|p| p.pass == pass));
    }
}

#[test]
fn test_batch_stack_alignment() {
    let counts = [1, 2, 3, 4, 5, 6, 7, 8, 9, 13, 1, 1, 22];
    let documents: Vec<SourceDocument> = counts
        .iter()
        .enumerate()
        .map(|(i, &p)| SourceDocument::new(format!("{:02}.pdf", i), p))
        .collect();

    let front = align_batch(&documents, Pass::Front).unwrap();
    let back = align_batch(&documents, Pass::Back).unwrap();

    let mut front_total = 0;
    let mut back_total = 0;
    for (f, b) in front.plans.iter().zip(&back.plans) {
        front_total += f.len();
        back_total += b.len();
        // Every document boundary leaves both stacks the same height
        assert_eq!(front_total, back_total, "after {}", f.document);
        // Real sheets differ by at most the in-flight half sheet
        assert!(f.real_sheets() - b.real_sheets() <= 1);
    }
}

#[test]
fn test_batch_rejects_invalid_document() {
    let documents = vec![
        SourceDocument::new("a.pdf", 3),
        SourceDocument::new("empty.pdf", 0),
    ];

    match align_batch(&documents, Pass::Front) {
        Err(SerialPrintError::InvalidPageCount {
            document: Some(name),
            page_count: 0,
        }) => assert_eq!(name, "empty.pdf"),
        other => panic!("Expected InvalidPageCount, got {:?}", other),
    }
}

#[test]
fn test_invalid_page_count_message_names_document() {
    let err = align_batch(&[SourceDocument::new("empty.pdf", 0)], Pass::Back).unwrap_err();
    assert!(err.to_string().contains("empty.pdf"));
}

#[test]
fn test_print_plan_counts() {
    let plan = plan_document(&SourceDocument::new("doc.pdf", 5), Pass::Back).unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.real_sheets(), 1);
    assert_eq!(plan.blank_sheets(), 1);
    assert_eq!(plan.page_numbers(), vec![3, 4]);
}

#[test]
fn test_pass_of_position() {
    assert_eq!(Pass::of_position(1), Pass::Front);
    assert_eq!(Pass::of_position(2), Pass::Back);
    assert_eq!(Pass::of_position(7), Pass::Front);
    assert_eq!(Pass::Back.to_string(), "back");
}

#[test]
fn test_sheet_display() {
    assert_eq!(Sheet::full(3).to_string(), "3,4");
    assert_eq!(Sheet::half(5).to_string(), "5,-");
    assert_eq!(Sheet::BLANK.to_string(), "BLANK");
}

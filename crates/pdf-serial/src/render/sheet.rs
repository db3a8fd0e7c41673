//! 2-up landscape sheet rendering

use super::xobject::{create_page_xobject, get_page_dimensions};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Render a print plan on a blocking worker thread
pub async fn render(source: Document, plan: PrintPlan) -> Result<Document> {
    tokio::task::spawn_blocking(move || render_plan(&source, &plan)).await?
}

/// Render a print plan into a PDF with one landscape page per sheet.
///
/// The left page keeps its own size and the right page is placed directly to
/// its right, so each output page is twice the left page's width. Blank sheets
/// become empty pages sized from the document's first page.
pub fn render_plan(source: &Document, plan: &PrintPlan) -> Result<Document> {
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    let reference = page_ids
        .first()
        .map(|&id| get_page_dimensions(source, id))
        .ok_or_else(|| SerialPrintError::InvalidPageCount {
            document: Some(plan.document.clone()),
            page_count: 0,
        })?;

    let lookup = |page: PageNumber| -> Result<ObjectId> {
        page.checked_sub(1)
            .and_then(|idx| page_ids.get(idx).copied())
            .ok_or_else(|| SerialPrintError::MissingPage {
                document: plan.document.clone(),
                page,
            })
    };

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut xobject_cache: HashMap<ObjectId, ObjectId> = HashMap::new();
    let mut page_refs = Vec::with_capacity(plan.sheets.len());

    for sheet in &plan.sheets {
        let left = sheet.left.map(&lookup).transpose()?;
        let right = sheet.right.map(&lookup).transpose()?;

        let (_, _, ref_w, ref_h) = left
            .map(|id| get_page_dimensions(source, id))
            .unwrap_or(reference);

        let mut content_ops = Vec::new();
        let mut xobjects = Dictionary::new();

        for (slot, page_id) in [left, right].into_iter().enumerate() {
            let Some(page_id) = page_id else { continue };
            let (x0, y0, _, _) = get_page_dimensions(source, page_id);
            let name = format!("P{}", slot);
            let xobject_id = create_page_xobject(&mut output, source, page_id, &mut xobject_cache)?;
            xobjects.set(name.as_bytes(), Object::Reference(xobject_id));

            // Move the XObject's BBox origin to the slot's lower-left corner
            let offset_x = slot as f32 * ref_w - x0;
            let offset_y = 0.0 - y0;
            content_ops.push(format!(
                "q 1 0 0 1 {} {} cm /{} Do Q\n",
                offset_x, offset_y, name
            ));
        }

        let page_id = add_sheet_page(
            &mut output,
            pages_tree_id,
            ref_w * 2.0,
            ref_h,
            content_ops.join(""),
            xobjects,
        );
        page_refs.push(Object::Reference(page_id));
    }

    // Create pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// Add one landscape output page; an empty content string yields a blank sheet.
fn add_sheet_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    width_pt: f32,
    height_pt: f32,
    content: String,
    xobjects: Dictionary,
) -> ObjectId {
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut resources = Dictionary::new();
    if !xobjects.is_empty() {
        resources.set("XObject", Object::Dictionary(xobjects));
    }

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

// src/io/columns.rs

/// Folds the accented Latin letters and ordinal/superscript marks that show
/// up in ERP exports ("Nº" -> "No"). Anything else outside ASCII is dropped.
fn fold_char(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }
    let folded = match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => 'a',
        'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' => 'O',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        'º' => 'o',
        'ª' => 'a',
        '¹' => '1',
        '²' => '2',
        '³' => '3',
        _ => return None,
    };
    Some(folded)
}

/// Canonical form of a column header: ASCII, lower-case, runs of anything
/// non-alphanumeric collapsed to `_`, no leading/trailing `_`.
///
/// "Número de artículo" -> "numero_de_articulo"
pub fn slug(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut pending_sep = false;
    for c in header.chars().filter_map(fold_char) {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

pub fn is_item_code_column(slug: &str) -> bool {
    ["numero_de_articulo", "codigo", "itemcode", "sku", "item"]
        .iter()
        .any(|prefix| slug.starts_with(prefix))
}

pub fn is_date_column(slug: &str) -> bool {
    slug.contains("fecha")
        || ["date", "postingdate", "docdate"]
            .iter()
            .any(|prefix| slug.starts_with(prefix))
}

pub fn is_quantity_column(slug: &str) -> bool {
    matches!(
        slug,
        "quantity" | "qty" | "cantidad" | "cantidad_de_articulos" | "qty_out"
    )
}

// Price tables use exact names
pub fn is_price_code_column(slug: &str) -> bool {
    matches!(slug, "numero_de_articulo" | "codigo" | "itemcode")
}

pub fn is_price_name_column(slug: &str) -> bool {
    matches!(slug, "descripcion_del_articulo" | "descripcion" | "itemname")
}

pub fn is_price_column(slug: &str) -> bool {
    matches!(
        slug,
        "precio_promedio" | "precio_de_articulo" | "precio_articulo" | "avgprice" | "precio"
    )
}

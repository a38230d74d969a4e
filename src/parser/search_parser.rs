// Search results page parsing
use crate::model::{ParserError, RawListing};
use scraper::{ElementRef, Html, Selector};

pub trait Parser {
    fn parse(&self, html: &str) -> Result<Vec<RawListing>, ParserError>;
}

const RESULT_TESTID_PREFIX: &str = "result-";

pub struct SearchResultsParser {
    item: Selector,
    price: Selector,
    address: Selector,
}

impl SearchResultsParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            item: selector(r#"li[data-testid^="result-"]"#)?,
            price: selector(r#"div[data-testid="price"] > span"#)?,
            address: selector(r#"p[data-testid="address"]"#)?,
        })
    }

    fn text_of(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
        element
            .select(selector)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string())
    }
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::Selector(e.to_string()))
}

impl Parser for SearchResultsParser {
    fn parse(&self, html: &str) -> Result<Vec<RawListing>, ParserError> {
        let document = Html::parse_document(html);

        let listings = document
            .select(&self.item)
            .map(|element| RawListing {
                id: element
                    .value()
                    .attr("data-testid")
                    .and_then(|testid| testid.strip_prefix(RESULT_TESTID_PREFIX))
                    .map(str::to_string),
                price: Self::text_of(element, &self.price),
                address: Self::text_of(element, &self.address),
            })
            .collect();

        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><ul>
          <li data-testid="result-101">
            <div data-testid="price"><span>€495,000</span></div>
            <p data-testid="address">12 Harbour Road, Howth</p>
          </li>
          <li data-testid="result-102">
            <div data-testid="price"><span>Price on Application</span></div>
          </li>
          <li data-testid="result-">
            <div data-testid="price"><span>€1</span></div>
          </li>
          <li data-testid="other-7"></li>
        </ul></body></html>
    "#;

    #[test]
    fn extracts_result_entries() {
        let parser = SearchResultsParser::new().unwrap();
        let raws = parser.parse(PAGE).unwrap();
        assert_eq!(raws.len(), 3);

        assert_eq!(raws[0].id.as_deref(), Some("101"));
        assert_eq!(raws[0].price.as_deref(), Some("€495,000"));
        assert_eq!(raws[0].address.as_deref(), Some("12 Harbour Road, Howth"));

        assert_eq!(raws[1].price.as_deref(), Some("Price on Application"));
        assert_eq!(raws[1].address, None);

        assert_eq!(raws[2].id.as_deref(), Some(""));
    }

    #[test]
    fn page_without_results_is_empty() {
        let parser = SearchResultsParser::new().unwrap();
        assert!(parser.parse("<html><body></body></html>").unwrap().is_empty());
    }
}

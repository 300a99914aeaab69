pub mod u508_import_affiliate_csv;

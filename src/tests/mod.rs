mod countries;
